//! Gap filling for raw record streams.
//!
//! A decoder only produces records for cells that exist. The engine expects
//! one record per column up to the last cell of a row, and an explicit
//! `EndOfRow` for every row including empty ones. [`MissingCellFiller`]
//! sits between the two and synthesizes the `MissingCell` and `EndOfRow`
//! records.

use std::collections::VecDeque;

use xls_stream_core::{Record, MAX_COLS, MAX_ROWS};

/// Iterator adapter that inserts `MissingCell` and `EndOfRow` records
#[derive(Debug)]
pub struct MissingCellFiller<I> {
    inner: I,
    queue: VecDeque<Record>,
    open_row: Option<u32>,
    last_col: Option<u16>,
    /// First row of the current sheet not yet closed
    next_row: u32,
    finished: bool,
}

impl<I: Iterator<Item = Record>> MissingCellFiller<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            queue: VecDeque::new(),
            open_row: None,
            last_col: None,
            next_row: 0,
            finished: false,
        }
    }

    fn enqueue(&mut self, record: Record) {
        match &record {
            Record::SheetBegin { .. } | Record::SheetEnd => {
                self.close_row();
                self.next_row = 0;
                self.queue.push_back(record);
            }
            Record::EndOfRow { row } => {
                if self.open_row == Some(*row) {
                    self.open_row = None;
                    self.last_col = None;
                }
                self.next_row = self.next_row.max(row.saturating_add(1));
                self.queue.push_back(record);
            }
            _ => match record.cell_position() {
                Some((row, col)) => self.enqueue_cell(row, col, record),
                None => self.queue.push_back(record),
            },
        }
    }

    fn enqueue_cell(&mut self, row: u32, col: u16, record: Record) {
        if self.open_row.is_some_and(|open| open != row) {
            self.close_row();
        }

        if row >= MAX_ROWS || col >= MAX_COLS {
            log::warn!("cell at row {row}, column {col} is outside the sheet grid; not filling");
            self.queue.push_back(record);
            return;
        }

        if self.open_row.is_none() {
            for empty in self.next_row..row {
                self.queue.push_back(Record::EndOfRow { row: empty });
            }
            self.open_row = Some(row);
            self.last_col = None;
        }

        let first_missing = self.last_col.map_or(0, |c| c.saturating_add(1));
        for missing in first_missing..col {
            self.queue.push_back(Record::MissingCell { row, col: missing });
        }

        self.queue.push_back(record);
        self.last_col = Some(self.last_col.map_or(col, |c| c.max(col)));
    }

    fn close_row(&mut self) {
        if let Some(row) = self.open_row.take() {
            self.queue.push_back(Record::EndOfRow { row });
            self.next_row = row.saturating_add(1);
        }
        self.last_col = None;
    }
}

impl<I: Iterator<Item = Record>> Iterator for MissingCellFiller<I> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            if let Some(record) = self.queue.pop_front() {
                return Some(record);
            }
            if self.finished {
                return None;
            }
            match self.inner.next() {
                Some(record) => self.enqueue(record),
                None => {
                    self.finished = true;
                    self.close_row();
                }
            }
        }
    }
}

/// Adds [`fill_missing_cells`](FillMissingCells::fill_missing_cells) to
/// record iterators
pub trait FillMissingCells: Iterator<Item = Record> + Sized {
    fn fill_missing_cells(self) -> MissingCellFiller<Self> {
        MissingCellFiller::new(self)
    }
}

impl<I: Iterator<Item = Record>> FillMissingCells for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label(row: u32, col: u16) -> Record {
        Record::LabelCell {
            row,
            col,
            text: format!("r{row}c{col}"),
        }
    }

    fn fill(records: Vec<Record>) -> Vec<Record> {
        records.into_iter().fill_missing_cells().collect()
    }

    #[test]
    fn test_fills_columns_and_closes_row() {
        let out = fill(vec![label(0, 0), label(0, 2)]);
        assert_eq!(
            out,
            vec![
                label(0, 0),
                Record::MissingCell { row: 0, col: 1 },
                label(0, 2),
                Record::EndOfRow { row: 0 },
            ]
        );
    }

    #[test]
    fn test_leading_and_empty_rows() {
        let out = fill(vec![label(1, 1), label(3, 0)]);
        assert_eq!(
            out,
            vec![
                Record::EndOfRow { row: 0 },
                Record::MissingCell { row: 1, col: 0 },
                label(1, 1),
                Record::EndOfRow { row: 1 },
                Record::EndOfRow { row: 2 },
                label(3, 0),
                Record::EndOfRow { row: 3 },
            ]
        );
    }

    #[test]
    fn test_sheet_boundaries_close_rows() {
        let out = fill(vec![
            Record::worksheet_begin(),
            label(0, 0),
            Record::SheetEnd,
            Record::worksheet_begin(),
            label(0, 1),
            Record::SheetEnd,
        ]);
        assert_eq!(
            out,
            vec![
                Record::worksheet_begin(),
                label(0, 0),
                Record::EndOfRow { row: 0 },
                Record::SheetEnd,
                Record::worksheet_begin(),
                Record::MissingCell { row: 0, col: 0 },
                label(0, 1),
                Record::EndOfRow { row: 0 },
                Record::SheetEnd,
            ]
        );
    }

    #[test]
    fn test_string_result_stays_with_formula() {
        let formula = Record::FormulaCell {
            row: 0,
            col: 1,
            result: f64::NAN,
            format: xls_stream_core::NumberFormat::General,
            expression: vec![],
        };
        let string = Record::DeferredStringResult { text: "x".into() };
        let out = fill(vec![formula, string.clone(), label(0, 2)]);

        assert_eq!(out.len(), 5);
        assert_eq!(out[0], Record::MissingCell { row: 0, col: 0 });
        assert!(matches!(out[1], Record::FormulaCell { col: 1, .. }));
        assert_eq!(out[2], string);
        assert_eq!(out[3], label(0, 2));
        assert_eq!(out[4], Record::EndOfRow { row: 0 });
    }

    #[test]
    fn test_existing_end_of_row_passes_through() {
        let out = fill(vec![label(0, 0), Record::EndOfRow { row: 0 }, label(1, 0)]);
        assert_eq!(
            out,
            vec![
                label(0, 0),
                Record::EndOfRow { row: 0 },
                label(1, 0),
                Record::EndOfRow { row: 1 },
            ]
        );
    }

    #[test]
    fn test_out_of_grid_cell_not_filled() {
        let stray = label(MAX_ROWS + 10, 0);
        let out = fill(vec![stray.clone()]);
        assert_eq!(out, vec![stray]);
    }
}
