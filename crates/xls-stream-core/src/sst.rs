//! Shared String Table (SST)

use crate::error::{Error, Result};

/// Text returned for a LABELSST seen before any SST record.
pub const MISSING_TABLE_PLACEHOLDER: &str = "(No SST Record, can't identify string)";

/// The document-wide table of unique strings. Loaded once, read-only after.
#[derive(Debug, Default)]
pub struct SharedStringTable {
    strings: Option<Vec<String>>,
}

impl SharedStringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the table. A document holds at most one SST, so a second
    /// load fails with [`Error::DuplicateTable`] and keeps the first table.
    pub fn load(&mut self, strings: Vec<String>) -> Result<()> {
        if let Some(existing) = &self.strings {
            return Err(Error::DuplicateTable {
                existing: existing.len(),
            });
        }
        self.strings = Some(strings);
        Ok(())
    }

    /// Look up a string by index.
    ///
    /// Before the table is loaded this yields [`MISSING_TABLE_PLACEHOLDER`]
    /// so every cell still produces a field. An index past the end is
    /// [`Error::CorruptIndex`].
    pub fn resolve(&self, index: u32) -> Result<&str> {
        let Some(strings) = &self.strings else {
            return Ok(MISSING_TABLE_PLACEHOLDER);
        };
        strings
            .get(index as usize)
            .map(String::as_str)
            .ok_or(Error::CorruptIndex {
                index,
                len: strings.len(),
            })
    }

    pub fn is_loaded(&self) -> bool {
        self.strings.is_some()
    }

    /// Number of strings, 0 when not loaded
    pub fn len(&self) -> usize {
        self.strings.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the table
    pub fn reset(&mut self) {
        self.strings = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(strings: &[&str]) -> SharedStringTable {
        let mut sst = SharedStringTable::new();
        sst.load(strings.iter().map(|s| s.to_string()).collect())
            .unwrap();
        sst
    }

    #[test]
    fn test_resolve() {
        let sst = table(&["alpha", "beta"]);
        assert_eq!(sst.resolve(1).unwrap(), "beta");
        // Lookups are stable
        assert_eq!(sst.resolve(1).unwrap(), sst.resolve(1).unwrap());
        assert_eq!(sst.len(), 2);
    }

    #[test]
    fn test_resolve_before_load() {
        let sst = SharedStringTable::new();
        assert!(!sst.is_loaded());
        assert_eq!(sst.resolve(4).unwrap(), MISSING_TABLE_PLACEHOLDER);
    }

    #[test]
    fn test_out_of_bounds() {
        let sst = table(&["only"]);
        assert_eq!(
            sst.resolve(3).unwrap_err(),
            Error::CorruptIndex { index: 3, len: 1 }
        );
    }

    #[test]
    fn test_duplicate_load() {
        let mut sst = table(&["first"]);
        let err = sst.load(vec!["second".into()]).unwrap_err();
        assert_eq!(err, Error::DuplicateTable { existing: 1 });
        assert_eq!(sst.resolve(0).unwrap(), "first");
    }

    #[test]
    fn test_reset() {
        let mut sst = table(&["x"]);
        sst.reset();
        assert!(!sst.is_loaded());
        sst.load(vec!["y".into()]).unwrap();
        assert_eq!(sst.resolve(0).unwrap(), "y");
    }
}
