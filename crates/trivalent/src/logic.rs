use std::fmt::Debug;

use crate::error::{EvalError, EvalResult};
use crate::operators::{LogicOp, Operator};

/// The value domain an [`Evaluator`](crate::Evaluator) computes in.
pub trait Logic {
    type Value: Clone + Debug;

    /// Converts a literal token into a value.
    fn resolve_literal(&self, literal: &str) -> EvalResult<Self::Value>;

    /// Applies `op` to its operands, given in left to right order.
    fn apply_operator(&self, op: &Operator, operands: &[Self::Value]) -> EvalResult<Self::Value>;
}

/// Finds the standard connective `op` stands for. Operators that only share a symbol with a
/// connective, but not its arity, are unknown.
pub fn connective(op: &Operator) -> EvalResult<LogicOp> {
    match LogicOp::from_symbol(op.symbol()) {
        Some(kind) if kind.arity() == op.arity() => Ok(kind),
        _ => Err(EvalError::UnknownOperator {
            symbol: op.symbol().to_owned(),
        }),
    }
}

pub(crate) fn operand_mismatch<T>(op: &Operator, operands: &[T]) -> EvalError {
    let symbol = op.symbol().to_owned();
    let expected = op.operand_count();
    let got = operands.len();
    if got > expected {
        EvalError::ExcessOperands {
            symbol,
            expected,
            got,
        }
    } else {
        EvalError::InsufficientOperands {
            symbol,
            expected,
            got,
        }
    }
}
