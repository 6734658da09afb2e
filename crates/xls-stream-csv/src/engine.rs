//! The conversion engine.
//!
//! [`Engine`] consumes records one at a time in stream order and writes
//! CSV as it goes. It owns every piece of per-document state: the sheet
//! index, the shared string table, the cursor and the formula resolver.

use std::io::Write;

use crate::cursor::Cursor;
use crate::emitter::{CsvEmitter, Field};
use crate::error::{EngineError, EngineResult};
use crate::formula::{FormulaResolver, Resolution};
use crate::options::{CorruptIndexPolicy, EngineOptions};
use xls_stream_core::{
    decode_rk, Record, SharedStringTable, Sheet, SheetIndex, SubstreamKind,
};
use xls_stream_format::{CellFormatter, DataFormatter, FormatContext};

/// Field written for a NOTE record
pub const NOTE_PLACEHOLDER: &str = "(unresolved annotation)";

/// Field written for an RK record whose raw bits were not kept
pub const RK_PLACEHOLDER: &str = "(undecoded number)";

/// Streaming record → CSV converter
pub struct Engine<W: Write, F: CellFormatter = DataFormatter> {
    emitter: CsvEmitter<W>,
    formatter: F,
    options: EngineOptions,
    ctx: FormatContext,
    sheets: SheetIndex,
    strings: SharedStringTable,
    cursor: Cursor,
    formulas: FormulaResolver,
    current_sheet: Option<Sheet>,
}

impl<W: Write> Engine<W> {
    /// Create an engine with the default [`DataFormatter`]
    pub fn new(writer: W, options: EngineOptions) -> Self {
        Self::with_formatter(writer, options, DataFormatter)
    }
}

impl<W: Write, F: CellFormatter> Engine<W, F> {
    /// Create an engine with a custom number formatter
    pub fn with_formatter(writer: W, options: EngineOptions, formatter: F) -> Self {
        Self {
            emitter: CsvEmitter::new(writer, &options),
            formatter,
            ctx: options.format_context(),
            formulas: FormulaResolver::new(options.render_mode),
            options,
            sheets: SheetIndex::new(),
            strings: SharedStringTable::new(),
            cursor: Cursor::new(),
            current_sheet: None,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The worksheet currently being written
    pub fn current_sheet(&self) -> Option<&Sheet> {
        self.current_sheet.as_ref()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Process a single record
    pub fn process(&mut self, record: &Record) -> EngineResult<()> {
        // Only a STRING record may follow a formula with a pending string
        // result; records the engine ignores (SHRFMLA, ARRAY) do not count.
        if record.cell_position().is_some()
            || matches!(
                record,
                Record::EndOfRow { .. } | Record::SheetBegin { .. } | Record::SheetEnd
            )
        {
            self.finish_pending_formula()?;
        }
        self.formulas.observe(record);

        match record {
            Record::SheetBoundary { name, offset } => {
                self.sheets.add_boundary(name.clone(), *offset);
            }
            Record::SheetBegin {
                kind: SubstreamKind::Worksheet,
            } => {
                let sheet = self
                    .sheets
                    .begin_worksheet()
                    .map_err(|e| EngineError::record(record, e))?;
                log::debug!("worksheet '{}' [{}]", sheet.name, sheet.display_index());
                self.cursor.reset();
                self.emitter.emit_sheet_header(&sheet)?;
                self.current_sheet = Some(sheet);
            }
            Record::SheetBegin { .. } | Record::SheetEnd => {}
            Record::StringTable { strings } => {
                self.strings
                    .load(strings.clone())
                    .map_err(|e| EngineError::record(record, e))?;
            }
            Record::DateMode { date_1904 } => self.ctx.date_1904 = *date_1904,
            // Collected by the formula resolver
            Record::ExternSheet { .. } | Record::DefinedName { .. } => {}

            Record::BlankCell { row, col }
            | Record::BoolOrErrorCell { row, col }
            | Record::MissingCell { row, col } => self.emit_cell(*row, *col, &Field::Empty)?,

            Record::FormulaCell {
                row,
                col,
                result,
                format,
                expression,
            } => {
                let resolution = self
                    .formulas
                    .resolve(
                        &mut self.cursor,
                        *row,
                        *col,
                        *result,
                        format,
                        expression,
                        &self.formatter,
                        &self.ctx,
                    )
                    .map_err(|source| EngineError::Formula {
                        row: *row,
                        col: *col,
                        source,
                    })?;
                if let Resolution::Ready(field) = resolution {
                    self.emit_cell(*row, *col, &field)?;
                }
            }
            Record::DeferredStringResult { text } => {
                match self.formulas.resolve_deferred_string(&mut self.cursor, text) {
                    Some((row, col, field)) => self.emit_cell(row, col, &field)?,
                    None => log::debug!("STRING record with no pending formula ignored"),
                }
            }

            Record::LabelCell { row, col, text } => {
                self.emit_cell(*row, *col, &Field::quoted(text.as_str()))?
            }
            Record::IndexedLabelCell { row, col, index } => {
                if !self.strings.is_loaded() {
                    log::warn!("row {row}, column {col}: LABELSST before SST");
                }
                let field = match self.strings.resolve(*index) {
                    Ok(text) => Field::quoted(text),
                    Err(err)
                        if err.is_recoverable()
                            && self.options.corrupt_index == CorruptIndexPolicy::Substitute =>
                    {
                        log::warn!("row {row}, column {col}: {err}; substituting placeholder");
                        Field::quoted(format!("(invalid string index {index})"))
                    }
                    Err(err) => return Err(EngineError::record(record, err)),
                };
                self.emit_cell(*row, *col, &field)?;
            }
            Record::NoteCell { row, col } => {
                self.emit_cell(*row, *col, &Field::quoted(NOTE_PLACEHOLDER))?
            }
            Record::NumericCell {
                row,
                col,
                value,
                format,
            } => {
                let text = self.formatter.format_number(*value, format, &self.ctx);
                self.emit_cell(*row, *col, &Field::plain(text))?;
            }
            Record::RkEncodedNumericCell {
                row,
                col,
                rk,
                format,
            } => {
                let field = match rk {
                    Some(bits) => Field::plain(self.formatter.format_number(
                        decode_rk(*bits),
                        format,
                        &self.ctx,
                    )),
                    None => Field::quoted(RK_PLACEHOLDER),
                };
                self.emit_cell(*row, *col, &field)?;
            }

            Record::EndOfRow { row } => {
                self.cursor.observe(*row);
                let padding = self.cursor.pad_to_minimum(self.options.min_columns);
                self.emitter.emit_padding(padding)?;
                self.emitter.emit_row_end()?;
            }
            Record::Unknown { sid } => log::trace!("ignoring record 0x{sid:04X}"),
        }

        Ok(())
    }

    /// Process every record, then flush the output
    pub fn run<I>(&mut self, records: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = Record>,
    {
        for record in records {
            self.process(&record)?;
        }
        self.finish_pending_formula()?;
        self.emitter.flush()?;
        Ok(())
    }

    /// Like [`run`](Self::run) for a source that can fail; the first
    /// source error stops the run as [`EngineError::Source`].
    pub fn run_fallible<I, E>(&mut self, records: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = Result<Record, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        for record in records {
            let record = record.map_err(|e| EngineError::Source(e.into()))?;
            self.process(&record)?;
        }
        self.finish_pending_formula()?;
        self.emitter.flush()?;
        Ok(())
    }

    /// Return to a fresh state for the next document. The writer is kept.
    pub fn reset(&mut self) {
        self.ctx = self.options.format_context();
        self.sheets.reset();
        self.strings.reset();
        self.cursor.reset();
        self.formulas.reset();
        self.current_sheet = None;
    }

    pub fn flush(&mut self) -> EngineResult<()> {
        self.emitter.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        self.emitter.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut W {
        self.emitter.get_mut()
    }

    pub fn into_inner(self) -> W {
        self.emitter.into_inner()
    }

    /// Write an empty field for a formula whose STRING record never came
    fn finish_pending_formula(&mut self) -> EngineResult<()> {
        if let Some((row, col)) = self.cursor.take_pending() {
            log::debug!("row {row}, column {col}: formula string result missing");
            self.emit_cell(row, col, &Field::Empty)?;
        }
        Ok(())
    }

    fn emit_cell(&mut self, row: u32, col: u16, field: &Field) -> EngineResult<()> {
        self.cursor.observe(row);
        self.emitter.emit_field(col, field)?;
        self.cursor.advance(row, col);
        Ok(())
    }
}
