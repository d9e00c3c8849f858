use thiserror::Error;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur while building the code graph
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Source could not be parsed; fatal to that file only
    #[error("Parse error in {file}: {message}")]
    ParseError { file: String, message: String },

    /// Tree-sitter failed to load or configure the grammar
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// Scope stack left unbalanced after a file walk; internal invariant
    /// violation, fatal to that file's traversal only
    #[error("Scope imbalance in {file}: {depth} frame(s) left on the stack")]
    ScopeImbalance { file: String, depth: usize },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl AnalyzerError {
    /// Create a parse error for a file
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }

    /// Create a scope imbalance error
    pub fn scope_imbalance(file: impl Into<String>, depth: usize) -> Self {
        Self::ScopeImbalance {
            file: file.into(),
            depth,
        }
    }
}
