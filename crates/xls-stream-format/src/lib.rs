//! # xls-stream-format
//!
//! Renders raw numeric cell values as display text.
//!
//! The conversion engine treats formatting as a collaborator behind the
//! [`CellFormatter`] trait. [`DataFormatter`] is the default implementation:
//! - General numbers (integers without decimals, up to 15 significant digits)
//! - Fixed decimals, thousands separators, percent and scientific codes
//! - Date and time codes, from serial numbers in the 1900 or 1904 system
//! - Locale decimal, thousands and date separators
//!
//! ## Example
//!
//! ```rust
//! use xls_stream_core::NumberFormat;
//! use xls_stream_format::{CellFormatter, DataFormatter, FormatContext};
//!
//! let ctx = FormatContext::default();
//! let text = DataFormatter.format_number(1234.5, &NumberFormat::from_id(4), &ctx);
//! assert_eq!(text, "1,234.50");
//! ```

mod date;
mod formatter;
mod locale;
mod number;

pub use date::serial_to_datetime;
pub use formatter::{CellFormatter, DataFormatter, FormatContext};
pub use locale::Locale;
pub use number::format_general;
