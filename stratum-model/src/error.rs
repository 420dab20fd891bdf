//! Error types for the model layer.

use thiserror::Error;

/// Result type for model serialization operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while serializing or merging model state.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The model's serde representation is not a JSON object.
    #[error("state model `{0}` does not serialize to a JSON object")]
    NotAnObject(&'static str),

    /// An incoming state payload is not a JSON object.
    #[error("state payload for `{0}` is not a JSON object")]
    PayloadNotAnObject(&'static str),
}
