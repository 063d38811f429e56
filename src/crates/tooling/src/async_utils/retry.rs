//! Retry utilities for async operations

use std::fmt;
use std::future::Future;

/// Retry budget for an idempotent operation
///
/// Attempts run back to back with no pause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Create a policy allowing `max_retries` additional attempts
    ///
    /// ```rust
    /// use tooling::async_utils::retry::RetryPolicy;
    ///
    /// let policy = RetryPolicy::new(2);
    /// assert_eq!(policy.max_attempts(), 3);
    /// ```
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Total number of attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Returned when every attempt allowed by a `RetryPolicy` failed
#[derive(Debug)]
pub struct RetryExhausted<E> {
    /// Number of attempts made
    pub attempts: u32,

    /// Error from the final attempt
    pub last_error: E,
}

impl<E: fmt::Display> fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gave up after {} attempt(s): {}",
            self.attempts, self.last_error
        )
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryExhausted<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// Execute an async operation until it succeeds or the budget runs out
///
/// The operation is re-invoked from scratch on every attempt, so it must be
/// safe to repeat.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> std::result::Result<T, RetryExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                if attempt >= max_attempts {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: error,
                    });
                }

                tracing::debug!(
                    operation = operation_name,
                    attempt = attempt,
                    max_attempts = max_attempts,
                    "Attempt failed: {}. Retrying...",
                    error
                );

                attempt += 1;
            }
        }
    }
}
