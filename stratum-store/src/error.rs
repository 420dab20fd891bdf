//! Error types for the backing-store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in backing-store operations.
///
/// Absence of data is never an error: lookups return `Option` and deletes
/// of missing entries succeed. These variants cover real failures only.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Session cache access failed.
    #[error("session store error: {0}")]
    Session(String),

    /// Object store operation failed.
    #[error("object store error: {0}")]
    Object(String),

    /// Shadow service operation failed.
    #[error("shadow store error: {0}")]
    Shadow(String),

    /// A shadow entity with the given name already exists.
    #[error("shadow entity already exists: {0}")]
    AlreadyExists(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
