use thiserror::Error;

/// Result type for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Errors that can occur while discovering source files
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Root path does not exist or is not readable
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
