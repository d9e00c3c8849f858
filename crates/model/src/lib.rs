//! # Impact Model
//!
//! Value types for the code dependency graph: nodes, edges, qualified
//! identities, and the scope context used to compute them.
//!
//! A node is a structural entity (file, class, function, method) keyed by
//! its fully qualified identity. An edge is a directed, typed fact
//! connecting two identities. The [`ScopeStack`] tracks enclosing
//! class/function frames during a single file's traversal and turns local
//! names into qualified identities.

mod scope;
mod types;

pub use scope::{ScopeFrame, ScopeStack};
pub use types::{Edge, EdgeKind, Node, NodeKind, Resolution, SourceFile, SourceLocation};
