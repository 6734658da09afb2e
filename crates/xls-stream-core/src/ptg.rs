//! Parsed formula tokens (`Ptg`) as carried by formula records.
//!
//! BIFF stores formulas as a reverse-Polish token list: operands are pushed,
//! operators and function calls pop their arguments. The decoder hands these
//! tokens over already parsed; the formula crate renders them back to text.

use crate::address::{CellAddress, CellRange};
use std::fmt;

/// Cell error values (`#DIV/0!` etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    Null,
    Div0,
    Value,
    Ref,
    Name,
    Num,
    Na,
}

impl CellError {
    /// Map a BIFF error code. Unknown codes read as `#VALUE!`.
    pub fn from_biff_code(code: u8) -> Self {
        match code {
            0x00 => CellError::Null,
            0x07 => CellError::Div0,
            0x0F => CellError::Value,
            0x17 => CellError::Ref,
            0x1D => CellError::Name,
            0x24 => CellError::Num,
            0x2A => CellError::Na,
            _ => CellError::Value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Null => "#NULL!",
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Na => "#N/A",
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-kinds of the `tAttr` token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrKind {
    /// `SUM` of the single operand on the stack
    Sum,
    /// Control tokens that do not change the rendered text
    /// (volatile marker, IF/CHOOSE jump tables, skip, whitespace)
    Volatile,
    If,
    Choose,
    Skip,
    Space,
}

/// A single formula token
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ptg {
    // === Operands ===
    Int(u16),
    Number(f64),
    Str(String),
    Bool(bool),
    Error(CellError),
    /// An omitted function argument
    MissArg,
    Ref(CellAddress),
    Area(CellRange),
    /// Reference into another sheet through an EXTERNSHEET entry
    Ref3d { ixti: u16, cell: CellAddress },
    Area3d { ixti: u16, area: CellRange },
    /// Deleted reference
    RefErr,
    AreaErr,
    RefErr3d { ixti: u16 },
    AreaErr3d { ixti: u16 },
    /// Defined name by 1-based NAME record index
    Name(u16),

    // === Binary operators ===
    Add,
    Sub,
    Mul,
    Div,
    Power,
    Concat,
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,
    Intersect,
    Union,
    Range,

    // === Unary operators ===
    UnaryPlus,
    UnaryMinus,
    Percent,
    Paren,

    // === Functions ===
    /// Fixed-arity built-in function
    Func { index: u16 },
    /// Variable-arity function with an explicit argument count
    FuncVar { index: u16, argc: u8 },
    Attr(AttrKind),
}

impl Ptg {
    /// The infix symbol of a binary operator token
    pub fn binary_symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            Ptg::Add => "+",
            Ptg::Sub => "-",
            Ptg::Mul => "*",
            Ptg::Div => "/",
            Ptg::Power => "^",
            Ptg::Concat => "&",
            Ptg::Lt => "<",
            Ptg::Le => "<=",
            Ptg::Eq => "=",
            Ptg::Ge => ">=",
            Ptg::Gt => ">",
            Ptg::Ne => "<>",
            Ptg::Intersect => " ",
            Ptg::Union => ",",
            Ptg::Range => ":",
            _ => return None,
        };
        Some(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CellError::from_biff_code(0x07), CellError::Div0);
        assert_eq!(CellError::from_biff_code(0x2A).to_string(), "#N/A");
        assert_eq!(CellError::from_biff_code(0x99), CellError::Value);
    }

    #[test]
    fn test_binary_symbols() {
        assert_eq!(Ptg::Ne.binary_symbol(), Some("<>"));
        assert_eq!(Ptg::Range.binary_symbol(), Some(":"));
        assert_eq!(Ptg::UnaryMinus.binary_symbol(), None);
    }
}
