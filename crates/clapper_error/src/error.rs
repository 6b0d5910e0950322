//! Top-level error wrapper types.

use crate::{
    ConfigError, GeminiError, JsonError, LedgerError, OpenAiError, PipelineError,
    RetryableError, StorageError, ValidationError,
};

/// Every failure the pipeline can report.
///
/// # Examples
///
/// ```
/// use clapper_error::{ClapperError, ClapperErrorKind, GeminiError, GeminiErrorKind};
///
/// let err: ClapperError = GeminiError::new(GeminiErrorKind::MissingApiKey).into();
/// assert!(matches!(err.kind(), ClapperErrorKind::Gemini(_)));
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ClapperErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Filesystem storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// JSONL ledger error
    #[from(LedgerError)]
    Ledger(LedgerError),
    /// Gemini Veo error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// OpenAI chat error
    #[from(OpenAiError)]
    OpenAi(OpenAiError),
    /// Workflow error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Input validation error
    #[from(ValidationError)]
    Validation(ValidationError),
}

/// Clapper error with kind discrimination.
///
/// # Examples
///
/// ```
/// use clapper_error::{ClapperResult, ConfigError};
///
/// fn might_fail() -> ClapperResult<()> {
///     Err(ConfigError::invalid("llm.temperature", "must be within [0, 2]"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Clapper Error: {}", _0)]
pub struct ClapperError(Box<ClapperErrorKind>);

impl ClapperError {
    /// Create a new error from a kind.
    pub fn new(kind: ClapperErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ClapperErrorKind {
        &self.0
    }
}

impl<T> From<T> for ClapperError
where
    T: Into<ClapperErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for ClapperError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            ClapperErrorKind::Gemini(e) => e.is_retryable(),
            ClapperErrorKind::OpenAi(e) => e.is_retryable(),
            _ => false,
        }
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self.kind() {
            ClapperErrorKind::Gemini(e) => e.retry_strategy_params(),
            ClapperErrorKind::OpenAi(e) => e.retry_strategy_params(),
            _ => (2000, 5, 60),
        }
    }
}

/// Result type for Clapper operations.
pub type ClapperResult<T> = std::result::Result<T, ClapperError>;
