//! Input validation errors.

/// Specific validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Scene name is empty or contains characters outside `[A-Za-z0-9_-]`
    #[display("Invalid scene name '{}': use letters, digits, '_' or '-'", _0)]
    SceneName(String),

    /// Take numbers start at 1
    #[display("Invalid take number {}: takes start at 1", _0)]
    TakeNumber(u32),

    /// Unknown frame type
    #[display("Invalid frame type '{}': expected start, end or reference", _0)]
    FrameType(String),

    /// Unknown resolution
    #[display("Invalid resolution '{}': expected 720p, 1080p or 4k", _0)]
    Resolution(String),

    /// Invalid field value
    #[display("Invalid value for '{}': {}", field, reason)]
    InvalidField {
        /// The field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Builder could not assemble a value
    #[display("Builder failed: {}", _0)]
    Builder(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use clapper_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::SceneName("../etc".to_string()));
/// assert!(format!("{}", err).contains("../etc"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    line: u32,
    file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

/// Convert from derive_builder error string.
impl From<String> for ValidationError {
    #[track_caller]
    fn from(msg: String) -> Self {
        Self::new(ValidationErrorKind::Builder(msg))
    }
}
