//! retry_with_backoff behavior with a counting operation.

use clapper_error::{GeminiError, GeminiErrorKind};
use clapper_models::{RetryOverrides, retry_with_backoff};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn fast(max_retries: usize) -> RetryOverrides {
    RetryOverrides {
        initial_backoff_ms: Some(1),
        max_retries: Some(max_retries),
        max_delay_secs: Some(1),
    }
}

fn unavailable() -> GeminiError {
    GeminiError::new(GeminiErrorKind::HttpError {
        status_code: 503,
        message: "overloaded".to_string(),
    })
}

#[tokio::test]
async fn test_success_needs_one_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let result: Result<u32, GeminiError> = retry_with_backoff(fast(3), || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(7) }
    })
    .await;

    assert_eq!(result.unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fail_then_succeed() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let result = retry_with_backoff(fast(3), || {
        let attempt = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt < 2 {
                Err(unavailable())
            } else {
                Ok("done")
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_attempts_are_capped() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let result: Result<(), GeminiError> = retry_with_backoff(fast(2), || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Err(unavailable()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_permanent_error_stops_immediately() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let result: Result<(), GeminiError> = retry_with_backoff(fast(5), || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Err(GeminiError::new(GeminiErrorKind::MissingApiKey)) }
    })
    .await;

    assert_eq!(result.unwrap_err().kind, GeminiErrorKind::MissingApiKey);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disabled_makes_single_attempt() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let result: Result<(), GeminiError> = retry_with_backoff(RetryOverrides::disabled(), || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Err(unavailable()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
