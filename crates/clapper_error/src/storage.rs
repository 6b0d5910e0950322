//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a project directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// File not found at the specified location
    #[display("File not found: {}", _0)]
    NotFound(String),
    /// Refusing to replace an existing file
    #[display("File already exists: {}", _0)]
    AlreadyExists(String),
    /// File extension is not in the allowed list
    #[display("Unsupported file type: {}", _0)]
    UnsupportedExtension(String),
    /// File is larger than the configured limit
    #[display("File too large: {}", _0)]
    TooLarge(String),
    /// Metadata document could not be parsed or written
    #[display("Invalid metadata: {}", _0)]
    Metadata(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use clapper_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("/tmp/frame.png".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
