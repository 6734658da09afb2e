//! RPN token list → formula text

use crate::error::{FormulaError, FormulaResult};
use crate::functions::{function_def, USER_DEFINED_FUNCTION};
use crate::workbook::WorkbookStub;
use xls_stream_core::{AttrKind, Ptg};

/// Render parsed formula tokens as infix text, without the leading `=`.
///
/// An empty token list renders as an empty string.
pub fn render_formula(tokens: &[Ptg], book: &WorkbookStub) -> FormulaResult<String> {
    let mut stack: Vec<String> = Vec::new();

    for (position, ptg) in tokens.iter().enumerate() {
        if let Some(symbol) = ptg.binary_symbol() {
            let mut operands = pop_operands(&mut stack, 2, position)?;
            let right = operands.pop().unwrap_or_default();
            let left = operands.pop().unwrap_or_default();
            stack.push(format!("{left}{symbol}{right}"));
            continue;
        }

        match ptg {
            Ptg::Int(value) => stack.push(value.to_string()),
            Ptg::Number(value) => stack.push(number_literal(*value)),
            Ptg::Str(text) => stack.push(format!("\"{}\"", text.replace('"', "\"\""))),
            Ptg::Bool(value) => stack.push(if *value { "TRUE" } else { "FALSE" }.to_string()),
            Ptg::Error(error) => stack.push(error.as_str().to_string()),
            Ptg::MissArg => stack.push(String::new()),
            Ptg::Ref(cell) => stack.push(cell.to_a1_string()),
            Ptg::Area(area) => stack.push(area.to_a1_string()),
            Ptg::Ref3d { ixti, cell } => {
                stack.push(format!("{}!{}", book.sheet_reference(*ixti)?, cell.to_a1_string()))
            }
            Ptg::Area3d { ixti, area } => {
                stack.push(format!("{}!{}", book.sheet_reference(*ixti)?, area.to_a1_string()))
            }
            Ptg::RefErr | Ptg::AreaErr => stack.push("#REF!".to_string()),
            Ptg::RefErr3d { ixti } | Ptg::AreaErr3d { ixti } => {
                stack.push(format!("{}!#REF!", book.sheet_reference(*ixti)?))
            }
            Ptg::Name(index) => stack.push(book.defined_name(*index)?.to_string()),

            Ptg::UnaryPlus => {
                let operand = pop_one(&mut stack, position)?;
                stack.push(format!("+{operand}"));
            }
            Ptg::UnaryMinus => {
                let operand = pop_one(&mut stack, position)?;
                stack.push(format!("-{operand}"));
            }
            Ptg::Percent => {
                let operand = pop_one(&mut stack, position)?;
                stack.push(format!("{operand}%"));
            }
            Ptg::Paren => {
                let operand = pop_one(&mut stack, position)?;
                stack.push(format!("({operand})"));
            }

            Ptg::Func { index } => {
                let def = function_def(*index).ok_or(FormulaError::UnknownFunction(*index))?;
                let argc = def
                    .fixed_args
                    .ok_or(FormulaError::VariableArity { name: def.name })?;
                let args = pop_operands(&mut stack, argc as usize, position)?;
                stack.push(call(def.name, &args));
            }
            Ptg::FuncVar { index, argc } => {
                let mut args = pop_operands(&mut stack, *argc as usize, position)?;
                if *index == USER_DEFINED_FUNCTION {
                    // First operand carries the function name
                    if args.is_empty() {
                        return Err(FormulaError::StackUnderflow {
                            position,
                            needed: 1,
                            available: 0,
                        });
                    }
                    let name = args.remove(0);
                    stack.push(call(&name, &args));
                } else {
                    let def =
                        function_def(*index).ok_or(FormulaError::UnknownFunction(*index))?;
                    stack.push(call(def.name, &args));
                }
            }

            Ptg::Attr(AttrKind::Sum) => {
                let operand = pop_one(&mut stack, position)?;
                stack.push(format!("SUM({operand})"));
            }
            Ptg::Attr(_) => {}

            // Binary operators were handled above
            _ => {}
        }
    }

    match stack.len() {
        0 => Ok(String::new()),
        1 => Ok(stack.pop().unwrap_or_default()),
        remaining => Err(FormulaError::UnbalancedExpression { remaining }),
    }
}

fn call(name: &str, args: &[String]) -> String {
    format!("{name}({})", args.join(","))
}

fn pop_one(stack: &mut Vec<String>, position: usize) -> FormulaResult<String> {
    stack.pop().ok_or(FormulaError::StackUnderflow {
        position,
        needed: 1,
        available: 0,
    })
}

/// Pop `count` operands, returned in push order
fn pop_operands(
    stack: &mut Vec<String>,
    count: usize,
    position: usize,
) -> FormulaResult<Vec<String>> {
    if stack.len() < count {
        return Err(FormulaError::StackUnderflow {
            position,
            needed: count,
            available: stack.len(),
        });
    }
    let at = stack.len() - count;
    Ok(stack.split_off(at))
}

fn number_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
