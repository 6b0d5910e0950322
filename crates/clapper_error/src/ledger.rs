//! Ledger error types.

/// Ledger failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LedgerErrorKind {
    /// Could not open the ledger file
    #[display("Failed to open ledger {}: {}", path, message)]
    Open {
        /// Ledger path
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Could not append a record
    #[display("Failed to append to ledger {}: {}", path, message)]
    Append {
        /// Ledger path
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Record could not be serialized to a single JSON line
    #[display("Failed to serialize ledger record: {}", _0)]
    Serialize(String),
}

/// Ledger error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Ledger Error: {} at line {} in {}", kind, line, file)]
pub struct LedgerError {
    /// The kind of error that occurred
    pub kind: LedgerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LedgerError {
    /// Create a new ledger error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LedgerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
