//! Storage error types.

use thiserror::Error;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Bind not found in the given scope.
    #[error("bind {bind_id} not found in scope {scope_id}")]
    BindNotFound { scope_id: String, bind_id: u64 },

    /// A bind failed structural validation on save or load.
    #[error("invalid bind: {message}")]
    InvalidBind { message: String },

    /// Serialization failure while talking to a document store.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Internal error.
    #[error("internal storage error: {message}")]
    Internal { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
