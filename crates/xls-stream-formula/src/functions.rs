//! Built-in function ids
//!
//! `tFunc` and `tFuncVar` tokens name their function by its index in the
//! BIFF built-in function table. Only the name and arity are needed to
//! render a call.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Id used by `tFuncVar` for add-in and user-defined functions. The
/// function name is then the first operand.
pub const USER_DEFINED_FUNCTION: u16 = 255;

/// Function definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDef {
    /// BIFF function index
    pub id: u16,
    /// Function name (uppercase)
    pub name: &'static str,
    /// Argument count for fixed-arity functions (None = variable)
    pub fixed_args: Option<u8>,
}

const fn fixed(id: u16, name: &'static str, args: u8) -> FunctionDef {
    FunctionDef {
        id,
        name,
        fixed_args: Some(args),
    }
}

const fn variable(id: u16, name: &'static str) -> FunctionDef {
    FunctionDef {
        id,
        name,
        fixed_args: None,
    }
}

const BUILTIN_FUNCTIONS: &[FunctionDef] = &[
    variable(0, "COUNT"),
    variable(1, "IF"),
    fixed(2, "ISNA", 1),
    fixed(3, "ISERROR", 1),
    variable(4, "SUM"),
    variable(5, "AVERAGE"),
    variable(6, "MIN"),
    variable(7, "MAX"),
    variable(8, "ROW"),
    variable(9, "COLUMN"),
    fixed(10, "NA", 0),
    fixed(15, "SIN", 1),
    fixed(19, "PI", 0),
    fixed(20, "SQRT", 1),
    fixed(24, "ABS", 1),
    fixed(25, "INT", 1),
    fixed(27, "ROUND", 2),
    variable(29, "INDEX"),
    fixed(30, "REPT", 2),
    fixed(31, "MID", 3),
    fixed(32, "LEN", 1),
    fixed(33, "VALUE", 1),
    fixed(34, "TRUE", 0),
    fixed(35, "FALSE", 0),
    variable(36, "AND"),
    variable(37, "OR"),
    fixed(38, "NOT", 1),
    fixed(39, "MOD", 2),
    fixed(48, "TEXT", 2),
    fixed(63, "RAND", 0),
    fixed(65, "DATE", 3),
    fixed(67, "DAY", 1),
    fixed(68, "MONTH", 1),
    fixed(69, "YEAR", 1),
    fixed(74, "NOW", 0),
    fixed(76, "ROWS", 1),
    fixed(77, "COLUMNS", 1),
    variable(78, "OFFSET"),
    variable(100, "CHOOSE"),
    variable(101, "HLOOKUP"),
    variable(102, "VLOOKUP"),
    fixed(112, "LOWER", 1),
    fixed(113, "UPPER", 1),
    variable(115, "LEFT"),
    variable(116, "RIGHT"),
    fixed(118, "TRIM", 1),
    variable(120, "SUBSTITUTE"),
    variable(124, "FIND"),
    fixed(127, "ISTEXT", 1),
    fixed(128, "ISNUMBER", 1),
    fixed(129, "ISBLANK", 1),
    variable(169, "COUNTA"),
    variable(183, "PRODUCT"),
    fixed(212, "ROUNDUP", 2),
    fixed(213, "ROUNDDOWN", 2),
    fixed(221, "TODAY", 0),
    variable(USER_DEFINED_FUNCTION, "USER"),
    variable(336, "CONCATENATE"),
    fixed(337, "POWER", 2),
    variable(344, "SUBTOTAL"),
    variable(345, "SUMIF"),
    fixed(346, "COUNTIF", 2),
    fixed(347, "COUNTBLANK", 1),
];

/// Global function table (lazily initialized)
static FUNCTION_TABLE: OnceLock<HashMap<u16, FunctionDef>> = OnceLock::new();

fn function_table() -> &'static HashMap<u16, FunctionDef> {
    FUNCTION_TABLE.get_or_init(|| BUILTIN_FUNCTIONS.iter().map(|f| (f.id, *f)).collect())
}

/// Look up a built-in function by BIFF index
pub fn function_def(id: u16) -> Option<&'static FunctionDef> {
    function_table().get(&id)
}
