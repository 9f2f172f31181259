//! Error types for cluster connection and user management.

use thiserror::Error;

/// Result type alias for cluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors raised by the cluster connection manager.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to connect to cluster: {0}")]
    Connect(String),

    #[error("failed to borrow session: {0}")]
    Session(String),

    #[error("cluster command failed: {0}")]
    Command(String),
}
