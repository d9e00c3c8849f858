use impact_model::NodeKind;
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur at the persistence boundary
#[derive(Error, Debug)]
pub enum StoreError {
    /// An edge referenced a node that was never upserted
    #[error("Unknown endpoint '{0}'")]
    MissingEndpoint(String),

    /// A node upsert collided with an existing identity of another kind
    #[error("Kind mismatch for '{identity}': stored {stored:?}, upsert {incoming:?}")]
    KindMismatch {
        identity: String,
        stored: NodeKind,
        incoming: NodeKind,
    },

    /// Query start node not present in the store
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}
