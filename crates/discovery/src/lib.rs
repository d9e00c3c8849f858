//! # Impact Discovery
//!
//! Finds candidate Python source files under a root and materializes
//! their contents in memory before analysis starts. Build, cache, and
//! virtual-env directories are skipped; `.gitignore` rules are honored.
//!
//! This is deliberately simple I/O: everything interesting happens in
//! the analyzer, which receives an already-filtered list of file
//! contents.

mod error;
mod scanner;

pub use error::{DiscoveryError, Result};
pub use scanner::FileScanner;

pub use impact_model::SourceFile;
