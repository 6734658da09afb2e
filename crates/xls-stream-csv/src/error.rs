//! Engine error types

use thiserror::Error;
use xls_stream_core::{Record, RecordKind};
use xls_stream_formula::FormulaError;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors that stop a conversion run
#[derive(Debug, Error)]
pub enum EngineError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record violated a workbook-level invariant
    #[error("{kind} record{at}: {source}", at = describe_position(.position))]
    Record {
        kind: RecordKind,
        position: Option<(u32, u16)>,
        #[source]
        source: xls_stream_core::Error,
    },

    /// Formula tokens could not be rendered
    #[error("Formula error at row {row}, column {col}: {source}")]
    Formula {
        row: u32,
        col: u16,
        #[source]
        source: FormulaError,
    },

    /// The record source itself failed
    #[error("Record source error: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wrap a core error with the kind and coordinates of the record that caused it
    pub fn record(record: &Record, source: xls_stream_core::Error) -> Self {
        EngineError::Record {
            kind: record.kind(),
            position: record.cell_position(),
            source,
        }
    }
}

fn describe_position(position: &Option<(u32, u16)>) -> String {
    match position {
        Some((row, col)) => format!(" at row {row}, column {col}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_context() {
        let record = Record::IndexedLabelCell {
            row: 3,
            col: 1,
            index: 9,
        };
        let err = EngineError::record(
            &record,
            xls_stream_core::Error::CorruptIndex { index: 9, len: 2 },
        );
        let message = err.to_string();
        assert!(message.starts_with("LABELSST record at row 3, column 1:"));
        assert!(message.contains("9"));
    }

    #[test]
    fn test_record_without_position() {
        let err = EngineError::record(
            &Record::worksheet_begin(),
            xls_stream_core::Error::Ordering {
                begin: 2,
                boundaries: 1,
            },
        );
        assert!(err.to_string().starts_with("BOF record: "));
    }
}
