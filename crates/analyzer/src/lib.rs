//! # Impact Analyzer
//!
//! Code graph construction engine: walks Python source trees, tracks
//! lexical context, resolves short names through per-file import tables,
//! and assembles a deduplicated, filtered node/edge set suitable for
//! impact analysis.
//!
//! ## Architecture
//!
//! ```text
//! SourceFile[]
//!     │
//!     ├──> Per-file traversal (tree-sitter CST, one worker per file)
//!     │      ├─ Scope stack: enclosing class/function frames
//!     │      ├─ Import table: alias -> candidate qualified names
//!     │      ├─ Emit File/Class/Function/Method nodes
//!     │      └─ Emit Calls/Imports/Inherits edge facts
//!     │
//!     ├──> Assembly barrier (all files collected)
//!     │      ├─ Merge nodes by identity
//!     │      ├─ Resolve edge targets against the global node set
//!     │      ├─ Drop external/built-in targets (exclusion config)
//!     │      └─ Deduplicate edges
//!     │
//!     └──> AssembledGraph { nodes, edges, stats }
//! ```
//!
//! Name resolution is deliberately best-effort: receiver types are never
//! inferred, so `Calls` edges to attribute targets are candidate
//! relationships, not proven ones.

mod analyzer;
mod assembler;
mod config;
mod error;
mod imports;
mod resolver;
mod stats;
mod visitor;

pub use analyzer::CodeAnalyzer;
pub use assembler::{AssembledGraph, GraphAssembler};
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use imports::ImportTable;
pub use resolver::NameResolver;
pub use stats::AnalysisStats;
pub use visitor::{FileFacts, FileVisitor};

pub use impact_model::SourceFile;
