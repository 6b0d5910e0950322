//! Retry classification shared by every provider error.

/// Trait for errors that support retry logic.
///
/// Implementors say whether a failure is transient and which backoff schedule
/// suits it.
///
/// # Examples
///
/// ```
/// use clapper_error::{GeminiError, GeminiErrorKind, RetryableError};
///
/// let err = GeminiError::new(GeminiErrorKind::HttpError {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Rate limits (429), overloads (503) and transport failures are transient.
    /// Authentication or bad-request failures are not.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}

/// Whether an HTTP status code is worth retrying.
///
/// ```
/// use clapper_error::is_retryable_status;
///
/// assert!(is_retryable_status(429));
/// assert!(!is_retryable_status(401));
/// ```
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Backoff parameters for an HTTP status code.
pub(crate) fn status_strategy_params(status: u16) -> (u64, usize, u64) {
    match status {
        429 => (5000, 3, 40),
        503 => (2000, 5, 60),
        500 | 502 | 504 => (1000, 3, 8),
        408 => (2000, 4, 30),
        _ => (2000, 5, 60),
    }
}
