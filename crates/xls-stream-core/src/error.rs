//! Error types for xls-stream-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the workbook-level tables
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A worksheet began but every collected sheet boundary is already taken
    #[error("worksheet #{begin} has no matching sheet boundary ({boundaries} collected)")]
    Ordering { begin: usize, boundaries: usize },

    /// A second shared string table arrived
    #[error("shared string table already loaded with {existing} strings")]
    DuplicateTable { existing: usize },

    /// A label referenced a string past the end of the table
    #[error("shared string index {index} out of bounds (table has {len} strings)")]
    CorruptIndex { index: u32, len: usize },
}

impl Error {
    /// Whether the conversion may continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::CorruptIndex { .. })
    }
}
