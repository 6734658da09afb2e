//! # xls-stream-csv
//!
//! Streaming conversion of decoded XLS (BIFF) records into CSV text.
//!
//! The [`Engine`] is fed records in stream order and writes output field by
//! field, so memory stays bounded apart from the shared string table.
//!
//! - [`Engine`] - Dispatches records and owns all per-document state
//! - [`MissingCellFiller`] - Synthesizes missing cells and row ends in
//!   front of a raw record stream
//! - [`Cursor`] - Last row/column and the pending formula
//! - [`FormulaResolver`] - Cached results, deferred string results, or
//!   formula text
//! - [`CsvEmitter`] - Column-driven separators and quoting
//!
//! ## Example
//!
//! ```rust
//! use xls_stream_core::Record;
//! use xls_stream_csv::{Engine, EngineOptions, FillMissingCells};
//!
//! let records = vec![
//!     Record::SheetBoundary { name: "Sheet1".into(), offset: 100 },
//!     Record::worksheet_begin(),
//!     Record::LabelCell { row: 0, col: 1, text: "b".into() },
//!     Record::SheetEnd,
//! ];
//!
//! let mut engine = Engine::new(Vec::new(), EngineOptions::default());
//! engine.run(records.into_iter().fill_missing_cells()).unwrap();
//! let csv = String::from_utf8(engine.into_inner()).unwrap();
//! assert_eq!(csv, "\nSheet1 [1]:\n,\"b\"\n");
//! ```

pub mod cursor;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod formula;
pub mod missing;
pub mod options;

pub use cursor::Cursor;
pub use emitter::{CsvEmitter, Field};
pub use engine::{Engine, NOTE_PLACEHOLDER, RK_PLACEHOLDER};
pub use error::{EngineError, EngineResult};
pub use formula::{FormulaResolver, Resolution};
pub use missing::{FillMissingCells, MissingCellFiller};
pub use options::{CorruptIndexPolicy, EngineOptions, LineTerminator, RenderMode};
