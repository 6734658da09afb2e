//! The decoded record stream.
//!
//! A [`Record`] is one structural unit of a BIFF workbook stream, already
//! decoded by an upstream reader. Records arrive in physical (file) order:
//! workbook globals first, then one BOF..EOF substream per sheet.

use crate::number_format::NumberFormat;
use crate::ptg::Ptg;
use std::fmt;

// BOF substream types (the `dt` field)
const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
const BOF_WORKSHEET: u16 = 0x0010;
const BOF_CHART: u16 = 0x0020;
const BOF_MACRO: u16 = 0x0040;

/// Kind of substream opened by a BOF record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubstreamKind {
    Globals,
    Worksheet,
    Chart,
    Macro,
    Other(u16),
}

impl SubstreamKind {
    /// Map the BOF `dt` field
    pub fn from_bof_type(dt: u16) -> Self {
        match dt {
            BOF_WORKBOOK_GLOBALS => SubstreamKind::Globals,
            BOF_WORKSHEET => SubstreamKind::Worksheet,
            BOF_CHART => SubstreamKind::Chart,
            BOF_MACRO => SubstreamKind::Macro,
            other => SubstreamKind::Other(other),
        }
    }
}

/// One EXTERNSHEET entry: a supporting book and a sheet span inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternSheetRef {
    pub supbook: u16,
    /// First sheet index in BOUNDSHEET order (0xFFFE/0xFFFF mark deleted refs)
    pub first_sheet: u16,
    pub last_sheet: u16,
}

/// A decoded record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Record {
    // ── Workbook globals ────────────────────────────────────────────────
    /// BOUNDSHEET: sheet name and the stream offset of its BOF
    SheetBoundary { name: String, offset: u32 },
    /// SST
    StringTable { strings: Vec<String> },
    /// EXTERNSHEET
    ExternSheet { refs: Vec<ExternSheetRef> },
    /// NAME (defined names in record order)
    DefinedName { name: String },
    /// DATEMODE
    DateMode { date_1904: bool },

    // ── Substream structure ─────────────────────────────────────────────
    /// BOF
    SheetBegin { kind: SubstreamKind },
    /// EOF
    SheetEnd,

    // ── Cells ───────────────────────────────────────────────────────────
    BlankCell { row: u32, col: u16 },
    BoolOrErrorCell { row: u32, col: u16 },
    /// FORMULA. A NaN `result` means the cached value is a string carried
    /// by the following [`Record::DeferredStringResult`].
    FormulaCell {
        row: u32,
        col: u16,
        result: f64,
        format: NumberFormat,
        expression: Vec<Ptg>,
    },
    /// STRING: cached string result of the preceding formula
    DeferredStringResult { text: String },
    /// LABEL: inline string
    LabelCell { row: u32, col: u16, text: String },
    /// LABELSST: string by shared string table index
    IndexedLabelCell { row: u32, col: u16, index: u32 },
    /// NOTE
    NoteCell { row: u32, col: u16 },
    /// NUMBER
    NumericCell {
        row: u32,
        col: u16,
        value: f64,
        format: NumberFormat,
    },
    /// RK. `rk` holds the raw encoded bits when the decoder kept them.
    RkEncodedNumericCell {
        row: u32,
        col: u16,
        rk: Option<u32>,
        format: NumberFormat,
    },

    // ── Synthesized by gap-filling ──────────────────────────────────────
    MissingCell { row: u32, col: u16 },
    EndOfRow { row: u32 },

    /// Anything else, by record id
    Unknown { sid: u16 },
}

/// Field-less discriminant of [`Record`], used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    SheetBoundary,
    StringTable,
    ExternSheet,
    DefinedName,
    DateMode,
    SheetBegin,
    SheetEnd,
    BlankCell,
    BoolOrErrorCell,
    FormulaCell,
    DeferredStringResult,
    LabelCell,
    IndexedLabelCell,
    NoteCell,
    NumericCell,
    RkEncodedNumericCell,
    MissingCell,
    EndOfRow,
    Unknown,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::SheetBoundary => "BOUNDSHEET",
            RecordKind::StringTable => "SST",
            RecordKind::ExternSheet => "EXTERNSHEET",
            RecordKind::DefinedName => "NAME",
            RecordKind::DateMode => "DATEMODE",
            RecordKind::SheetBegin => "BOF",
            RecordKind::SheetEnd => "EOF",
            RecordKind::BlankCell => "BLANK",
            RecordKind::BoolOrErrorCell => "BOOLERR",
            RecordKind::FormulaCell => "FORMULA",
            RecordKind::DeferredStringResult => "STRING",
            RecordKind::LabelCell => "LABEL",
            RecordKind::IndexedLabelCell => "LABELSST",
            RecordKind::NoteCell => "NOTE",
            RecordKind::NumericCell => "NUMBER",
            RecordKind::RkEncodedNumericCell => "RK",
            RecordKind::MissingCell => "MissingCell",
            RecordKind::EndOfRow => "EndOfRow",
            RecordKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::SheetBoundary { .. } => RecordKind::SheetBoundary,
            Record::StringTable { .. } => RecordKind::StringTable,
            Record::ExternSheet { .. } => RecordKind::ExternSheet,
            Record::DefinedName { .. } => RecordKind::DefinedName,
            Record::DateMode { .. } => RecordKind::DateMode,
            Record::SheetBegin { .. } => RecordKind::SheetBegin,
            Record::SheetEnd => RecordKind::SheetEnd,
            Record::BlankCell { .. } => RecordKind::BlankCell,
            Record::BoolOrErrorCell { .. } => RecordKind::BoolOrErrorCell,
            Record::FormulaCell { .. } => RecordKind::FormulaCell,
            Record::DeferredStringResult { .. } => RecordKind::DeferredStringResult,
            Record::LabelCell { .. } => RecordKind::LabelCell,
            Record::IndexedLabelCell { .. } => RecordKind::IndexedLabelCell,
            Record::NoteCell { .. } => RecordKind::NoteCell,
            Record::NumericCell { .. } => RecordKind::NumericCell,
            Record::RkEncodedNumericCell { .. } => RecordKind::RkEncodedNumericCell,
            Record::MissingCell { .. } => RecordKind::MissingCell,
            Record::EndOfRow { .. } => RecordKind::EndOfRow,
            Record::Unknown { .. } => RecordKind::Unknown,
        }
    }

    /// Row and column of a cell record. `EndOfRow` and records without a
    /// cell position return `None`.
    pub fn cell_position(&self) -> Option<(u32, u16)> {
        match *self {
            Record::BlankCell { row, col }
            | Record::BoolOrErrorCell { row, col }
            | Record::FormulaCell { row, col, .. }
            | Record::LabelCell { row, col, .. }
            | Record::IndexedLabelCell { row, col, .. }
            | Record::NoteCell { row, col }
            | Record::NumericCell { row, col, .. }
            | Record::RkEncodedNumericCell { row, col, .. }
            | Record::MissingCell { row, col } => Some((row, col)),
            _ => None,
        }
    }

    /// Shorthand for a worksheet BOF
    pub fn worksheet_begin() -> Self {
        Record::SheetBegin {
            kind: SubstreamKind::Worksheet,
        }
    }
}
