//! Pipeline configuration errors.

/// Why a pipeline configuration could not be used.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigErrorKind {
    /// `--config` pointed at a file that does not exist
    #[display("Configuration file not found: {}", _0)]
    MissingFile(String),
    /// A layer could not be read or merged
    #[display("Failed to build configuration: {}", _0)]
    Build(String),
    /// The merged layers do not match the pipeline sections
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// A setting holds a value the pipeline cannot run with
    #[display("Invalid setting {}: {}", key, reason)]
    InvalidSetting {
        /// Dotted key, e.g. `generation.poll_interval_secs`
        key: String,
        /// What is wrong with the value
        reason: String,
    },
}

/// Configuration error with source location.
///
/// ```
/// use clapper_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::invalid("generation.poll_interval_secs", "must be positive");
/// assert!(matches!(err.kind, ConfigErrorKind::InvalidSetting { ref key, .. } if key == "generation.poll_interval_secs"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// What went wrong
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`ConfigErrorKind::InvalidSetting`].
    #[track_caller]
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        })
    }
}
