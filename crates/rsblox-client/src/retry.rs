//! Retry policy with exponential backoff.
//!
//! Modeled as an explicit policy object injected into the fetch client, so
//! the schedule is testable in isolation under tokio's paused clock.

use std::time::Duration;

use crate::error::FetchError;

/// Retry policy for the fetch client.
///
/// `max_attempts` counts every attempt including the first; `backoff(n)`
/// gives the delay before retry attempt `n` (1-based), doubling from
/// `base_delay` up to `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Whether to retry after the given completed attempt (1-based) failed
    /// with `error`.
    pub fn should_retry(&self, error: &FetchError, attempt: u32) -> bool {
        error.is_retryable() && attempt < self.max_attempts
    }

    /// Delay before retry attempt `attempt` (1-based): exponential from
    /// `base_delay`, capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let policy = RetryPolicy::default()
            .with_base_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(500));

        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(4), Duration::from_millis(500));
        assert_eq!(policy.backoff(10), Duration::from_millis(500));
    }

    #[test]
    fn test_retryable_errors() {
        let policy = RetryPolicy::default().with_max_attempts(3);

        let transport = FetchError::Transport {
            message: "connection reset".to_string(),
        };
        let too_many = FetchError::Http { status: 429 };
        let unavailable = FetchError::Http { status: 503 };
        let bad_request = FetchError::Http { status: 400 };
        let decode = FetchError::Decode {
            message: "bad json".to_string(),
        };

        assert!(policy.should_retry(&transport, 1));
        assert!(policy.should_retry(&too_many, 1));
        assert!(policy.should_retry(&unavailable, 2));
        assert!(!policy.should_retry(&bad_request, 1));
        assert!(!policy.should_retry(&decode, 1));
        assert!(!policy.should_retry(&FetchError::NotFound, 1));
    }

    #[test]
    fn test_attempts_bound_retries() {
        let policy = RetryPolicy::default().with_max_attempts(2);
        let err = FetchError::Http { status: 503 };

        assert!(policy.should_retry(&err, 1));
        assert!(!policy.should_retry(&err, 2));
    }

    #[test]
    fn test_none_policy_never_retries() {
        let policy = RetryPolicy::none();
        let err = FetchError::Transport {
            message: "timeout".to_string(),
        };
        assert!(!policy.should_retry(&err, 1));
    }
}
