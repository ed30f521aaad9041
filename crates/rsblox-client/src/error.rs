//! Fetch error types.

use thiserror::Error;

/// Errors from the typed fetch layer.
///
/// Transport failures and retryable HTTP statuses (429/5xx) are retried per
/// [`crate::retry::RetryPolicy`]; everything else surfaces immediately.
/// `NotFound` (HTTP 404) is domain-meaningful control flow, not a fault.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Connection or timeout failure before a status was received.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Non-success HTTP status.
    #[error("http status {status}")]
    Http { status: u16 },

    /// Response body did not match the expected shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// The remote entity does not exist (HTTP 404).
    #[error("not found")]
    NotFound,
}

impl FetchError {
    /// Transport failures and 429/5xx statuses are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Http { status } => *status == 429 || *status >= 500,
            FetchError::Decode { .. } | FetchError::NotFound => false,
        }
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
