//! Errors rendering pipeline documents as JSON.

/// A report, ledger view or metadata file that could not be serialized.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Could not encode {} as JSON: {} (line {} in {})", document, message, line, file)]
pub struct JsonError {
    /// Document being encoded, e.g. "status report"
    pub document: String,
    /// serde_json's message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Record a failure encoding `document`.
    ///
    /// ```
    /// use clapper_error::JsonError;
    ///
    /// let err = JsonError::new("status report", "key must be a string");
    /// assert_eq!(err.document, "status report");
    /// assert!(err.to_string().starts_with("Could not encode status report"));
    /// ```
    #[track_caller]
    pub fn new(document: impl Into<String>, message: impl std::fmt::Display) -> Self {
        let location = std::panic::Location::caller();
        Self {
            document: document.into(),
            message: message.to_string(),
            line: location.line(),
            file: location.file(),
        }
    }
}
