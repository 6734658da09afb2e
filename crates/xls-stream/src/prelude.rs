//! Prelude module - common imports for xls-stream users
//!
//! ```rust
//! use xls_stream::prelude::*;
//! ```

pub use crate::{
    convert,
    convert_to_string,
    CellAddress,
    CellFormatter,
    CorruptIndexPolicy,
    DataFormatter,
    Engine,
    EngineError,
    EngineOptions,
    FillMissingCells,
    LineTerminator,
    Locale,
    NumberFormat,
    Ptg,
    Record,
    RenderMode,
    SubstreamKind,
};
