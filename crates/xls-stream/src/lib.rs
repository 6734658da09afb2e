//! # xls-stream
//!
//! Converts the record stream of a legacy Excel (XLS, BIFF) workbook into
//! CSV text, one sheet after another, without building the workbook in
//! memory.
//!
//! Records come from an external BIFF decoder in file order. Each worksheet
//! is written as a blank line, a `Name [n]:` header, then one line per row.
//!
//! ## Features
//!
//! - Sheets numbered by their position in the file, not by BOUNDSHEET order
//! - Shared strings, inline labels, numbers and dates through a locale-aware
//!   formatter
//! - Formula cells as cached values (including string results carried by the
//!   following record) or as formula text
//! - Missing cells filled in and rows padded to a minimum width
//!
//! ## Example
//!
//! ```rust
//! use xls_stream::prelude::*;
//!
//! let records = vec![
//!     Record::SheetBoundary { name: "Sheet1".into(), offset: 100 },
//!     Record::StringTable { strings: vec!["total".into()] },
//!     Record::worksheet_begin(),
//!     Record::IndexedLabelCell { row: 0, col: 0, index: 0 },
//!     Record::NumericCell { row: 0, col: 2, value: 12.5, format: NumberFormat::General },
//!     Record::SheetEnd,
//! ];
//!
//! let options = EngineOptions::default().with_min_columns(4);
//! let csv = xls_stream::convert_to_string(records, options).unwrap();
//! assert_eq!(csv, "\nSheet1 [1]:\n\"total\",,12.5,\n");
//! ```

pub mod prelude;

use std::io::Write;

pub use xls_stream_core::{
    decode_rk, AttrKind, CellAddress, CellError, CellRange, Error, ExternSheetRef,
    NumberFormat, Ptg, Record, RecordKind, Result, SharedStringTable, Sheet, SheetIndex,
    SubstreamKind, MISSING_TABLE_PLACEHOLDER,
};
pub use xls_stream_csv::{
    CorruptIndexPolicy, CsvEmitter, Cursor, Engine, EngineError, EngineOptions, EngineResult,
    Field, FillMissingCells, FormulaResolver, LineTerminator, MissingCellFiller, RenderMode,
    Resolution, NOTE_PLACEHOLDER, RK_PLACEHOLDER,
};
pub use xls_stream_format::{
    format_general, serial_to_datetime, CellFormatter, DataFormatter, FormatContext, Locale,
};
pub use xls_stream_formula::{render_formula, FormulaError, FormulaResult, WorkbookStub};

/// Convert a raw record stream, filling missing cells, and write CSV to `writer`.
///
/// Returns the writer once the stream is exhausted.
pub fn convert<I, W>(records: I, writer: W, options: EngineOptions) -> EngineResult<W>
where
    I: IntoIterator<Item = Record>,
    W: Write,
{
    let mut engine = Engine::new(writer, options);
    engine.run(records.into_iter().fill_missing_cells())?;
    log::debug!(
        "converted {} worksheet(s)",
        engine.current_sheet().map_or(0, Sheet::display_index)
    );
    Ok(engine.into_inner())
}

/// [`convert`] into a `String`
pub fn convert_to_string<I>(records: I, options: EngineOptions) -> EngineResult<String>
where
    I: IntoIterator<Item = Record>,
{
    let bytes = convert(records, Vec::new(), options)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
