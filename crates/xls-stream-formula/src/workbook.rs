//! Workbook-level lookups needed to render formulas.
//!
//! A formula only stores indices: 3-D references point into the
//! EXTERNSHEET table, which in turn points at sheets in BOUNDSHEET order,
//! and name tokens point at NAME records. All of these arrive in the
//! workbook globals ahead of the first worksheet.

use crate::error::{FormulaError, FormulaResult};
use xls_stream_core::{ExternSheetRef, Record};

/// EXTERNSHEET sheet index marking a workbook-level reference
const SHEET_WORKBOOK_LEVEL: u16 = 0xFFFE;
/// EXTERNSHEET sheet index marking a deleted sheet
const SHEET_DELETED: u16 = 0xFFFF;

/// Collects workbook-global records until the stub is built
#[derive(Debug, Default, Clone)]
pub struct WorkbookStubBuilder {
    sheet_names: Vec<String>,
    extern_sheets: Vec<ExternSheetRef>,
    names: Vec<String>,
}

impl WorkbookStubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take what the stub needs from a record; other records are ignored
    pub fn observe(&mut self, record: &Record) {
        match record {
            Record::SheetBoundary { name, .. } => self.sheet_names.push(name.clone()),
            Record::ExternSheet { refs } => self.extern_sheets.extend_from_slice(refs),
            Record::DefinedName { name } => self.names.push(name.clone()),
            _ => {}
        }
    }

    pub fn sheet<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_names.push(name.into());
        self
    }

    pub fn extern_sheet(mut self, first_sheet: u16, last_sheet: u16) -> Self {
        self.extern_sheets.push(ExternSheetRef {
            supbook: 0,
            first_sheet,
            last_sheet,
        });
        self
    }

    pub fn defined_name<S: Into<String>>(mut self, name: S) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn build(&self) -> WorkbookStub {
        log::debug!(
            "workbook stub: {} sheets, {} EXTERNSHEET entries, {} names",
            self.sheet_names.len(),
            self.extern_sheets.len(),
            self.names.len()
        );
        WorkbookStub {
            sheet_names: self.sheet_names.clone(),
            extern_sheets: self.extern_sheets.clone(),
            names: self.names.clone(),
        }
    }
}

/// Read-only sheet and name lookups for formula rendering
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkbookStub {
    sheet_names: Vec<String>,
    extern_sheets: Vec<ExternSheetRef>,
    names: Vec<String>,
}

impl WorkbookStub {
    pub fn builder() -> WorkbookStubBuilder {
        WorkbookStubBuilder::new()
    }

    /// Sheet name by BOUNDSHEET index
    pub fn sheet_name(&self, index: u16) -> Option<&str> {
        self.sheet_names.get(index as usize).map(String::as_str)
    }

    /// Defined name by 1-based NAME index
    pub fn defined_name(&self, index: u16) -> FormulaResult<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.names.get(i as usize))
            .map(String::as_str)
            .ok_or(FormulaError::UnknownName(index))
    }

    /// The sheet prefix of a 3-D reference, without the `!`.
    ///
    /// Returns `Sheet1`, `'My Sheet'`, `Sheet1:Sheet3` for a span, or
    /// `#REF` when the entry points at a deleted sheet.
    pub fn sheet_reference(&self, ixti: u16) -> FormulaResult<String> {
        let entry = self
            .extern_sheets
            .get(ixti as usize)
            .ok_or(FormulaError::UnknownExternSheet(ixti))?;

        if matches!(entry.first_sheet, SHEET_WORKBOOK_LEVEL | SHEET_DELETED) {
            return Ok("#REF".to_string());
        }

        let first = self
            .sheet_name(entry.first_sheet)
            .ok_or(FormulaError::UnknownExternSheet(ixti))?;
        if entry.last_sheet == entry.first_sheet {
            return Ok(quote_sheet_name(first));
        }

        let last = self
            .sheet_name(entry.last_sheet)
            .ok_or(FormulaError::UnknownExternSheet(ixti))?;
        if needs_quotes(first) || needs_quotes(last) {
            Ok(format!("'{}:{}'", escape(first), escape(last)))
        } else {
            Ok(format!("{first}:{last}"))
        }
    }
}

/// Quote a sheet name if it is not a plain identifier
pub fn quote_sheet_name(name: &str) -> String {
    if needs_quotes(name) {
        format!("'{}'", escape(name))
    } else {
        name.to_string()
    }
}

fn needs_quotes(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => true,
        Some(first) if !(first.is_alphabetic() || first == '_') => true,
        Some(_) => !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.'),
    }
}

fn escape(name: &str) -> String {
    name.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stub() -> WorkbookStub {
        WorkbookStub::builder()
            .sheet("Sheet1")
            .sheet("My Sheet")
            .sheet("Sheet3")
            .extern_sheet(0, 0)
            .extern_sheet(1, 1)
            .extern_sheet(0, 2)
            .extern_sheet(SHEET_DELETED, SHEET_DELETED)
            .defined_name("Total")
            .build()
    }

    #[test]
    fn test_sheet_reference() {
        let stub = stub();
        assert_eq!(stub.sheet_reference(0).unwrap(), "Sheet1");
        assert_eq!(stub.sheet_reference(1).unwrap(), "'My Sheet'");
        assert_eq!(stub.sheet_reference(2).unwrap(), "Sheet1:Sheet3");
        assert_eq!(stub.sheet_reference(3).unwrap(), "#REF");
        assert_eq!(
            stub.sheet_reference(9),
            Err(FormulaError::UnknownExternSheet(9))
        );
    }

    #[test]
    fn test_defined_names() {
        let stub = stub();
        assert_eq!(stub.defined_name(1).unwrap(), "Total");
        assert_eq!(stub.defined_name(0), Err(FormulaError::UnknownName(0)));
        assert_eq!(stub.defined_name(2), Err(FormulaError::UnknownName(2)));
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Data"), "Data");
        assert_eq!(quote_sheet_name("2024"), "'2024'");
        assert_eq!(quote_sheet_name("Bob's"), "'Bob''s'");
    }

    #[test]
    fn test_observe_records() {
        let mut builder = WorkbookStubBuilder::new();
        builder.observe(&Record::SheetBoundary {
            name: "Data".into(),
            offset: 10,
        });
        builder.observe(&Record::ExternSheet {
            refs: vec![ExternSheetRef {
                supbook: 0,
                first_sheet: 0,
                last_sheet: 0,
            }],
        });
        builder.observe(&Record::SheetEnd);

        let stub = builder.build();
        assert_eq!(stub.sheet_reference(0).unwrap(), "Data");
    }
}
