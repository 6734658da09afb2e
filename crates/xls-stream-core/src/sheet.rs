//! Sheet index resolution.
//!
//! BOUNDSHEET records list every sheet together with the stream offset of
//! its BOF, but not necessarily in stream order. Worksheet substreams are
//! processed in stream order, so the n-th worksheet BOF belongs to the
//! boundary with the n-th smallest offset.

use crate::error::{Error, Result};

/// A worksheet matched to its boundary record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    /// Stream offset of the sheet's BOF
    pub offset: u32,
    /// 0-based logical index, in offset order
    pub index: usize,
}

impl Sheet {
    /// 1-based index for display
    pub fn display_index(&self) -> usize {
        self.index + 1
    }

    /// The header line printed before the sheet's rows, e.g. `Sheet1 [1]:`
    pub fn header(&self) -> String {
        format!("{} [{}]:", self.name, self.display_index())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Boundary {
    name: String,
    offset: u32,
}

/// Collects sheet boundaries and hands out [`Sheet`]s as worksheets begin.
#[derive(Debug, Default)]
pub struct SheetIndex {
    /// Boundaries in arrival (BOUNDSHEET) order
    boundaries: Vec<Boundary>,
    /// Boundaries sorted by offset, built on the first worksheet BOF
    ordered: Option<Vec<Boundary>>,
    begun: usize,
}

impl SheetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a BOUNDSHEET.
    ///
    /// A boundary arriving after the first worksheet began is merged into
    /// the part of the ordering not yet handed out.
    pub fn add_boundary<S: Into<String>>(&mut self, name: S, offset: u32) {
        let boundary = Boundary {
            name: name.into(),
            offset,
        };

        if let Some(ordered) = self.ordered.as_mut() {
            let mut pos = ordered.partition_point(|b| b.offset <= offset);
            if pos < self.begun {
                log::warn!(
                    "sheet '{}' at offset {} precedes {} worksheet(s) already started",
                    boundary.name,
                    offset,
                    self.begun
                );
                pos = self.begun;
            }
            ordered.insert(pos, boundary.clone());
        }

        self.boundaries.push(boundary);
    }

    /// Advance to the next worksheet.
    ///
    /// Sorts the collected boundaries by offset on first use. Fails with
    /// [`Error::Ordering`] when more worksheets begin than boundaries exist.
    pub fn begin_worksheet(&mut self) -> Result<Sheet> {
        let boundaries = &self.boundaries;
        let ordered = self
            .ordered
            .get_or_insert_with(|| order_by_offset(boundaries));

        let Some(boundary) = ordered.get(self.begun) else {
            return Err(Error::Ordering {
                begin: self.begun + 1,
                boundaries: ordered.len(),
            });
        };

        let sheet = Sheet {
            name: boundary.name.clone(),
            offset: boundary.offset,
            index: self.begun,
        };
        self.begun += 1;
        Ok(sheet)
    }

    /// Sheet names in BOUNDSHEET order, the order EXTERNSHEET indices use
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boundaries.iter().map(|b| b.name.as_str())
    }

    /// Number of boundaries collected
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Number of worksheets started so far
    pub fn worksheets_begun(&self) -> usize {
        self.begun
    }

    /// Forget all boundaries and the computed ordering
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Stable sort by offset; equal offsets keep arrival order.
fn order_by_offset(boundaries: &[Boundary]) -> Vec<Boundary> {
    let mut ordered = boundaries.to_vec();
    ordered.sort_by_key(|b| b.offset);
    ordered
}
