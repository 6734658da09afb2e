//! Row/column tracking.

/// Position of the last emitted cell, plus the formula waiting for its
/// string result.
///
/// The column resets whenever an observed row differs from the last one,
/// so the first field of every row starts without a separator.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cursor {
    last_row: Option<u32>,
    last_col: Option<u16>,
    pending: Option<(u32, u16)>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a record at `row`. Returns `true` when this starts a new row.
    pub fn observe(&mut self, row: u32) -> bool {
        let new_row = self.last_row != Some(row);
        if new_row {
            self.last_col = None;
            self.last_row = Some(row);
        }
        new_row
    }

    /// Record the coordinates of a cell that was just emitted
    pub fn advance(&mut self, row: u32, col: u16) {
        self.last_row = Some(row);
        self.last_col = Some(col);
    }

    /// Number of separators needed so the row holds at least `min_columns`
    /// fields. Resets the column for the next row.
    pub fn pad_to_minimum(&mut self, min_columns: i32) -> usize {
        let last_col = self.last_col.take().map_or(0, i64::from);
        if min_columns <= 0 {
            return 0;
        }
        (i64::from(min_columns) - 1 - last_col).max(0) as usize
    }

    pub fn last_row(&self) -> Option<u32> {
        self.last_row
    }

    pub fn last_col(&self) -> Option<u16> {
        self.last_col
    }

    /// Remember a formula whose string result arrives in the next record.
    /// Replaces any earlier pending formula.
    pub fn set_pending(&mut self, row: u32, col: u16) {
        self.pending = Some((row, col));
    }

    pub fn take_pending(&mut self) -> Option<(u32, u16)> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<(u32, u16)> {
        self.pending
    }

    /// Back to the initial sentinels
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
