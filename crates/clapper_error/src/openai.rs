//! OpenAI chat completion error types.

use crate::retry::{RetryableError, is_retryable_status, status_strategy_params};

/// OpenAI-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OpenAiErrorKind {
    /// API key not found in environment
    #[display("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Request could not be sent
    #[display("OpenAI request failed: {}", _0)]
    Request(String),
    /// Non-success HTTP status
    #[display("OpenAI API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
    /// Response body could not be parsed
    #[display("Failed to parse OpenAI response: {}", _0)]
    Parse(String),
    /// Completion contained no choices
    #[display("OpenAI returned no choices")]
    EmptyResponse,
}

/// OpenAI error with location tracking.
///
/// # Examples
///
/// ```
/// use clapper_error::{OpenAiError, OpenAiErrorKind, RetryableError};
///
/// let err = OpenAiError::new(OpenAiErrorKind::Api { status: 401, message: "bad key".into() });
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("OpenAI Error: {} at line {} in {}", kind, line, file)]
pub struct OpenAiError {
    /// The kind of error that occurred
    pub kind: OpenAiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl OpenAiError {
    /// Create a new OpenAiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: OpenAiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for OpenAiError {
    fn is_retryable(&self) -> bool {
        match &self.kind {
            OpenAiErrorKind::Api { status, .. } => is_retryable_status(*status),
            OpenAiErrorKind::Request(_) => true,
            _ => false,
        }
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match &self.kind {
            OpenAiErrorKind::Api { status, .. } => status_strategy_params(*status),
            _ => (1000, 3, 10),
        }
    }
}
