//! Exponential backoff around a single external call.

use clapper_error::RetryableError;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{info, warn};

/// Caller overrides for the error-derived retry schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryOverrides {
    /// Replace the initial backoff
    pub initial_backoff_ms: Option<u64>,
    /// Replace the number of retries after the first failure
    pub max_retries: Option<usize>,
    /// Replace the backoff cap
    pub max_delay_secs: Option<u64>,
}

impl RetryOverrides {
    /// No retries at all.
    pub fn disabled() -> Self {
        Self {
            max_retries: Some(0),
            ..Self::default()
        }
    }

    fn apply(&self, (initial_ms, retries, max_delay): (u64, usize, u64)) -> (u64, usize, u64) {
        (
            self.initial_backoff_ms.unwrap_or(initial_ms),
            self.max_retries.unwrap_or(retries),
            self.max_delay_secs.unwrap_or(max_delay),
        )
    }
}

/// Run `operation`, retrying transient failures with jittered exponential backoff.
///
/// The first failure decides the schedule through
/// [`RetryableError::retry_strategy_params`], adjusted by `overrides`.
/// Permanent failures are returned without retrying. At most
/// `1 + max_retries` attempts are made.
pub async fn retry_with_backoff<T, E, F, Fut>(overrides: RetryOverrides, mut operation: F) -> Result<T, E>
where
    E: RetryableError + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let first = match operation().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if !first.is_retryable() {
        warn!(error = %first, "Permanent error, failing immediately");
        return Err(first);
    }

    let (initial_ms, max_retries, max_delay_secs) = overrides.apply(first.retry_strategy_params());
    let mut delays = ExponentialBackoff::from_millis(initial_ms)
        .factor(2)
        .max_delay(Duration::from_secs(max_delay_secs))
        .map(jitter)
        .take(max_retries);

    let Some(delay) = delays.next() else {
        return Err(first);
    };

    info!(
        error = %first,
        initial_backoff_ms = initial_ms,
        max_retries,
        max_delay_secs,
        "Transient error, will retry with configured strategy"
    );
    tokio::time::sleep(delay).await;

    Retry::spawn(delays, || {
        let attempt = operation();
        async move {
            match attempt.await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Attempt failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await
}
