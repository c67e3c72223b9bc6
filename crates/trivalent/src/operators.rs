use std::fmt::Display;

use itertools::Itertools;
use strum::{EnumIter, IntoEnumIterator};

use crate::error::{EvalError, EvalResult};

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub fn operand_count(self) -> usize {
        match self {
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

impl TryFrom<usize> for Arity {
    type Error = usize;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            1 => Ok(Self::Unary),
            2 => Ok(Self::Binary),
            _ => Err(count),
        }
    }
}

/// An infix or prefix operator known to an evaluator.
///
/// Operators are compared by all three fields, but the symbol alone is the key in a registry.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct Operator {
    symbol: String,
    arity: Arity,
    precedence: i32,
}

impl Operator {
    pub fn new(symbol: &str, operand_count: usize, precedence: i32) -> EvalResult<Self> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(EvalError::InvalidOperator {
                symbol: symbol.to_owned(),
                reason: "symbol cannot be empty",
            });
        }
        if trimmed.len() != symbol.len() {
            return Err(EvalError::InvalidOperator {
                symbol: symbol.to_owned(),
                reason: "symbol cannot have surrounding whitespace",
            });
        }
        let Ok(arity) = Arity::try_from(operand_count) else {
            return Err(EvalError::InvalidOperator {
                symbol: symbol.to_owned(),
                reason: "only unary and binary operators are supported",
            });
        };
        Ok(Self {
            symbol: symbol.to_owned(),
            arity,
            precedence,
        })
    }

    pub fn unary(symbol: &str, precedence: i32) -> EvalResult<Self> {
        Self::new(symbol, 1, precedence)
    }

    pub fn binary(symbol: &str, precedence: i32) -> EvalResult<Self> {
        Self::new(symbol, 2, precedence)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn operand_count(&self) -> usize {
        self.arity.operand_count()
    }

    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    /// Whether this operator, sitting on the operator stack, must be applied before `incoming` is
    /// pushed. Equal precedence pops, so operators group left to right.
    pub fn binds_before(&self, incoming: &Operator) -> bool {
        self.precedence >= incoming.precedence
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// The standard connectives shared by the boolean and fuzzy evaluators.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, EnumIter)]
pub enum LogicOp {
    Not,
    And,
    Or,
    Implies,
    Equiv,
}

impl LogicOp {
    pub fn symbol(self) -> &'static str {
        use LogicOp::*;
        match self {
            Not => "!",
            And => "&",
            Or => "|",
            Implies => "->",
            Equiv => "<->",
        }
    }

    pub fn precedence(self) -> i32 {
        use LogicOp::*;
        match self {
            Not => 5,
            And => 4,
            Or => 3,
            Implies => 2,
            Equiv => 1,
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::Not => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::iter().find(|op| op.symbol() == symbol)
    }

    pub fn operator(self) -> Operator {
        Operator {
            symbol: self.symbol().to_owned(),
            arity: self.arity(),
            precedence: self.precedence(),
        }
    }

    /// The standard operator list, from tightest to loosest binding.
    pub fn operators() -> Vec<Operator> {
        Self::iter().map(Self::operator).collect_vec()
    }
}

impl Display for LogicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_validation() {
        assert!(Operator::new("&", 2, 4).is_ok());
        assert!(matches!(
            Operator::new("", 2, 4),
            Err(EvalError::InvalidOperator { .. })
        ));
        assert!(matches!(
            Operator::new("  ", 1, 4),
            Err(EvalError::InvalidOperator { .. })
        ));
        assert!(matches!(
            Operator::new(" &", 2, 4),
            Err(EvalError::InvalidOperator { .. })
        ));
        assert!(matches!(
            Operator::new("?", 3, 1),
            Err(EvalError::InvalidOperator { .. })
        ));
        assert!(matches!(
            Operator::new("?", 0, 1),
            Err(EvalError::InvalidOperator { .. })
        ));
    }

    #[test]
    fn equal_precedence_binds_left() {
        let implies = LogicOp::Implies.operator();
        let and = LogicOp::And.operator();
        assert!(implies.binds_before(&implies));
        assert!(and.binds_before(&implies));
        assert!(!implies.binds_before(&and));
    }

    #[test]
    fn standard_operators() {
        let ops = LogicOp::operators();
        assert_eq!(
            ops.iter().map(Operator::symbol).collect_vec(),
            ["!", "&", "|", "->", "<->"]
        );
        assert!(ops.iter().tuple_windows().all(|(a, b)| a.precedence() > b.precedence()));
        assert_eq!(ops[0].arity(), Arity::Unary);
        assert_eq!(LogicOp::from_symbol("<->"), Some(LogicOp::Equiv));
        assert_eq!(LogicOp::from_symbol("-"), None);
    }
}
