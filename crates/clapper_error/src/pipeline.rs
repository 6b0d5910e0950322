//! Workflow-level error types.

/// Pipeline failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Scene is not present in the pipeline configuration
    #[display("Scene '{}' is not configured", _0)]
    UnknownScene(String),
    /// Reference image path does not exist
    #[display("Reference image not found: {}", _0)]
    ReferenceImageNotFound(String),
    /// Nothing to generate for a batch request
    #[display("No default prompts configured for: {}", _0)]
    NoPrompts(String),
    /// LLM output could not be used
    #[display("Unusable LLM output: {}", _0)]
    LlmOutput(String),
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
