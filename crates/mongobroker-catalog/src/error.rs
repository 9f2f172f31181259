//! Error types for catalog operations.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by the plan and tenant catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog read failed: {0}")]
    Read(String),

    #[error("catalog write failed: {0}")]
    Write(String),

    #[error("catalog delete failed: {0}")]
    Delete(String),

    #[error("failed to borrow session: {0}")]
    Session(String),
}
