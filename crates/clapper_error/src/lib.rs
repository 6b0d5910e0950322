//! Error types for the Clapper pipeline.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific failure
//! - `*Error` struct wraps the kind with the source location that created it
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! # Examples
//!
//! ```
//! use clapper_error::{ClapperResult, GeminiError, GeminiErrorKind};
//!
//! fn fetch_clip() -> ClapperResult<Vec<u8>> {
//!     Err(GeminiError::new(GeminiErrorKind::ApiRequest("connection refused".into())))?
//! }
//!
//! assert!(fetch_clip().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod json;
mod ledger;
mod openai;
mod pipeline;
mod retry;
mod storage;
mod validation;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{ClapperError, ClapperErrorKind, ClapperResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use json::JsonError;
pub use ledger::{LedgerError, LedgerErrorKind};
pub use openai::{OpenAiError, OpenAiErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use retry::{RetryableError, is_retryable_status};
pub use storage::{StorageError, StorageErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
