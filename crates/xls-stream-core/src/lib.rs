//! # xls-stream-core
//!
//! Core data structures for the xls-stream conversion engine.
//!
//! This crate provides the types shared by every stage of the pipeline:
//! - [`Record`] - One decoded structural record of a legacy (BIFF) workbook stream
//! - [`Ptg`] - Parsed formula tokens carried by formula records
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing used when rendering formulas
//! - [`NumberFormat`] - The format code attached to numeric cells
//! - [`SheetIndex`] - Maps worksheet substreams to their names in physical order
//! - [`SharedStringTable`] - The document-wide string table
//!
//! ## Example
//!
//! ```rust
//! use xls_stream_core::{SheetIndex, SharedStringTable};
//!
//! let mut sheets = SheetIndex::new();
//! sheets.add_boundary("Second", 500);
//! sheets.add_boundary("First", 100);
//! assert_eq!(sheets.begin_worksheet().unwrap().name, "First");
//!
//! let mut sst = SharedStringTable::new();
//! sst.load(vec!["hello".to_string()]).unwrap();
//! assert_eq!(sst.resolve(0).unwrap(), "hello");
//! ```

pub mod address;
pub mod error;
pub mod number_format;
pub mod ptg;
pub mod record;
pub mod rk;
pub mod sheet;
pub mod sst;

pub use address::{CellAddress, CellRange};
pub use error::{Error, Result};
pub use number_format::NumberFormat;
pub use ptg::{AttrKind, CellError, Ptg};
pub use record::{ExternSheetRef, Record, RecordKind, SubstreamKind};
pub use rk::decode_rk;
pub use sheet::{Sheet, SheetIndex};
pub use sst::{SharedStringTable, MISSING_TABLE_PLACEHOLDER};

/// Maximum number of rows in a BIFF8 worksheet
pub const MAX_ROWS: u32 = 65_536;

/// Maximum number of columns in a BIFF8 worksheet
pub const MAX_COLS: u16 = 256;
