//! Error types for igesrust library.

use std::io;
use thiserror::Error;

/// Main error type for igesrust operations.
#[derive(Debug, Error)]
pub enum IgesError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A physical line violates the 80-column layout.
    #[error("Invalid line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    /// Structural inconsistency between sections or records.
    #[error("Structural error: {0}")]
    Structure(String),

    /// A field could not be parsed into its declared type.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A parameter record does not carry the number of fields its entity requires.
    #[error("Incorrect number of fields for entity {entity}: expected {expected}, got {actual}")]
    FieldCount {
        entity: i32,
        expected: String,
        actual: usize,
    },

    /// A directory pointer references a missing entry or an entry of the wrong kind.
    #[error("Invalid {kind} pointer: {pointer}")]
    InvalidPointer { kind: &'static str, pointer: i32 },

    /// Generic error with custom message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for igesrust operations.
pub type Result<T> = std::result::Result<T, IgesError>;
