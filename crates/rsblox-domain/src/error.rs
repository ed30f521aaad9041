//! Domain error types for bind resolution.

use thiserror::Error;

/// Domain-specific errors for entity resolution and bind evaluation.
///
/// `NotFound` is domain-meaningful control flow: the evaluator turns it into
/// "criterion not satisfied" rather than surfacing it. `Unavailable` is a
/// transient resolution failure that already exhausted the fetch layer's
/// retries; outside strict mode it marks the affected bind indeterminate.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// The referenced remote entity does not exist.
    #[error("{entity} not found")]
    NotFound { entity: String },

    /// The entity could not be resolved due to a transient failure.
    #[error("{entity} unavailable: {message}")]
    Unavailable { entity: String, message: String },

    /// A response body did not match its expected shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Malformed bind or criterion rejected at construction.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Evaluation deadline expired (strict mode only).
    #[error("timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
