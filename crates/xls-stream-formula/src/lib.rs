//! # xls-stream-formula
//!
//! Turns parsed formula tokens back into formula text.
//!
//! This crate provides:
//! - [`WorkbookStub`] - The sheet, EXTERNSHEET and defined-name lookups a
//!   formula needs, collected from workbook-global records
//! - [`render_formula`] - RPN token list → infix text (`SUM(A1:B2)*2`)
//! - A table of built-in BIFF function ids
//!
//! ## Example
//!
//! ```rust
//! use xls_stream_core::{CellAddress, Ptg};
//! use xls_stream_formula::{render_formula, WorkbookStub};
//!
//! let tokens = vec![
//!     Ptg::Ref(CellAddress::new(0, 0)),
//!     Ptg::Int(2),
//!     Ptg::Mul,
//! ];
//! let text = render_formula(&tokens, &WorkbookStub::default()).unwrap();
//! assert_eq!(text, "A1*2");
//! ```

pub mod error;
pub mod functions;
pub mod render;
pub mod workbook;

pub use error::{FormulaError, FormulaResult};
pub use functions::{function_def, FunctionDef, USER_DEFINED_FUNCTION};
pub use render::render_formula;
pub use workbook::{quote_sheet_name, WorkbookStub, WorkbookStubBuilder};
