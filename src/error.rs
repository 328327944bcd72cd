use thiserror::Error;

/// Result type for network construction and evaluation.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors raised while building, loading or activating a network.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("expected {expected} input values, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    #[error("unknown activation kind: {0}")]
    UnknownActivationKind(String),

    #[error("unknown node kind: {0}")]
    UnknownNodeKind(String),

    /// A connection endpoint that this network never issued.
    #[error("node {id} does not exist (network has {len} nodes)")]
    UnknownNode { id: usize, len: usize },

    #[error("connection {id} does not exist (network has {len} connections)")]
    UnknownConnection { id: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
