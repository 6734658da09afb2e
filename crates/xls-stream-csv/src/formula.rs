//! Formula cell resolution.

use crate::cursor::Cursor;
use crate::emitter::Field;
use crate::options::RenderMode;
use xls_stream_core::{NumberFormat, Ptg, Record};
use xls_stream_format::{CellFormatter, FormatContext};
use xls_stream_formula::{render_formula, FormulaResult, WorkbookStub, WorkbookStubBuilder};

/// Outcome of resolving a formula cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The field can be written now
    Ready(Field),
    /// The result is a string carried by the next record
    Deferred,
}

/// Turns formula cells into fields, in one [`RenderMode`] for the whole run.
#[derive(Debug)]
pub struct FormulaResolver {
    mode: RenderMode,
    builder: WorkbookStubBuilder,
    /// Built on the first expression that needs it
    stub: Option<WorkbookStub>,
}

impl FormulaResolver {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            builder: WorkbookStubBuilder::new(),
            stub: None,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Feed workbook-global records to the stub builder. Records arriving
    /// after the stub was built are not seen by it.
    pub fn observe(&mut self, record: &Record) {
        if self.stub.is_none() {
            self.builder.observe(record);
        }
    }

    /// Resolve a FORMULA record.
    ///
    /// In [`RenderMode::Values`] a NaN result marks a string result that
    /// arrives in the next record: the cell is left pending on the cursor
    /// and [`Resolution::Deferred`] is returned.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve<F: CellFormatter>(
        &mut self,
        cursor: &mut Cursor,
        row: u32,
        col: u16,
        result: f64,
        format: &NumberFormat,
        expression: &[Ptg],
        formatter: &F,
        ctx: &FormatContext,
    ) -> FormulaResult<Resolution> {
        match self.mode {
            RenderMode::Values if result.is_nan() => {
                cursor.set_pending(row, col);
                Ok(Resolution::Deferred)
            }
            RenderMode::Values => Ok(Resolution::Ready(Field::plain(
                formatter.format_number(result, format, ctx),
            ))),
            RenderMode::Expression => {
                let builder = &self.builder;
                let stub = self.stub.get_or_insert_with(|| builder.build());
                let text = render_formula(expression, stub)?;
                Ok(Resolution::Ready(Field::quoted(text)))
            }
        }
    }

    /// Resolve a STRING record against the pending formula.
    ///
    /// Returns the pending formula's coordinates with the text, or `None`
    /// when no formula is pending.
    pub fn resolve_deferred_string(
        &self,
        cursor: &mut Cursor,
        text: &str,
    ) -> Option<(u32, u16, Field)> {
        let (row, col) = cursor.take_pending()?;
        Some((row, col, Field::quoted(text)))
    }

    /// Forget collected workbook records and the built stub
    pub fn reset(&mut self) {
        self.builder = WorkbookStubBuilder::new();
        self.stub = None;
    }
}
