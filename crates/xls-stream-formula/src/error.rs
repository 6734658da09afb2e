//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while rendering a token list
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// An operator or function needed more operands than were pushed
    #[error("token {position} needs {needed} operand(s), stack holds {available}")]
    StackUnderflow {
        position: usize,
        needed: usize,
        available: usize,
    },

    /// Operands left over after the last token
    #[error("formula leaves {remaining} operands on the stack")]
    UnbalancedExpression { remaining: usize },

    /// Function id not in the built-in table
    #[error("Unknown function id: {0}")]
    UnknownFunction(u16),

    /// Fixed-arity token for a function whose arity is not fixed
    #[error("function {name} has no fixed argument count")]
    VariableArity { name: &'static str },

    /// 3-D reference to an EXTERNSHEET entry that was never declared
    #[error("Unknown EXTERNSHEET index: {0}")]
    UnknownExternSheet(u16),

    /// Reference to a NAME record that was never declared
    #[error("Unknown defined name index: {0}")]
    UnknownName(u16),
}
