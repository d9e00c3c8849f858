//! # Impact Store
//!
//! The persistence boundary for assembled code graphs.
//!
//! The engine hands a finished node/edge set across [`GraphStore`]; the
//! store owns it from there. Upserts are keyed by `(kind, identity)` for
//! nodes and `(kind, source, target)` for edges, so re-submission updates
//! rather than duplicates. Edges whose endpoints are absent are rejected
//! per item; a failed upsert never aborts a whole load.
//!
//! [`MemoryGraphStore`] is the in-process implementation, backed by a
//! petgraph directed graph, and answers the impact queries: everything a
//! node calls transitively (forward) and everything that would break if
//! the node changed (reverse), both bounded by a hop count.

mod error;
mod memory;
mod store;

pub use error::{Result, StoreError};
pub use memory::{ImpactedNode, MemoryGraphStore};
pub use store::{load_graph, GraphStore, LoadReport, RejectedItem};
