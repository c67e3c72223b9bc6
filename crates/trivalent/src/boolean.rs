use std::collections::HashMap;

use crate::engine::Evaluator;
use crate::error::{EvalError, EvalResult};
use crate::logic::{Logic, connective, operand_mismatch};
use crate::operators::{LogicOp, Operator};

/// Classical two-valued logic. `true` and `false` are always literals, other names must be bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanLogic {
    bindings: HashMap<String, bool>,
}

impl BooleanLogic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings<K: Into<String>>(bindings: impl IntoIterator<Item = (K, bool)>) -> Self {
        Self {
            bindings: bindings
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn bindings(&self) -> &HashMap<String, bool> {
        &self.bindings
    }
}

impl Logic for BooleanLogic {
    type Value = bool;

    fn resolve_literal(&self, literal: &str) -> EvalResult<bool> {
        match literal {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => self
                .bindings
                .get(literal)
                .copied()
                .ok_or_else(|| EvalError::UnknownLiteral {
                    literal: literal.to_owned(),
                }),
        }
    }

    fn apply_operator(&self, op: &Operator, operands: &[bool]) -> EvalResult<bool> {
        use LogicOp::*;
        Ok(match (connective(op)?, operands) {
            (Not, &[a]) => !a,
            (And, &[a, b]) => a && b,
            (Or, &[a, b]) => a || b,
            (Implies, &[a, b]) => !(a && !b),
            (Equiv, &[a, b]) => a == b,
            _ => return Err(operand_mismatch(op, operands)),
        })
    }
}

pub type BooleanEvaluator = Evaluator<BooleanLogic>;

impl Evaluator<BooleanLogic> {
    pub fn boolean<K: Into<String>>(bindings: impl IntoIterator<Item = (K, bool)>) -> Self {
        Self::standard(BooleanLogic::with_bindings(bindings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_with(bindings: &[(&str, bool)], expression: &str) -> bool {
        BooleanEvaluator::boolean(bindings.iter().copied())
            .evaluate(expression)
            .unwrap()
    }

    #[test]
    fn negation() {
        assert!(!eval_with(&[("A", true)], "!A"));
        assert!(eval_with(&[("A", false)], "!A"));
        assert!(eval_with(&[("A", true)], "!(!A)"));
    }

    #[test]
    fn connective_truth_tables() {
        let cases = [
            ("A & B", [true, false, false, false]),
            ("A | B", [true, true, true, false]),
            ("A -> B", [true, false, true, true]),
            ("A <-> B", [true, false, false, true]),
        ];
        let assignments = [(true, true), (true, false), (false, true), (false, false)];
        for (expression, expected) in cases {
            for ((a, b), want) in assignments.into_iter().zip(expected) {
                assert_eq!(
                    eval_with(&[("A", a), ("B", b)], expression),
                    want,
                    "{expression} with A={a}, B={b}"
                );
            }
        }
    }

    #[test]
    fn constant_literals() {
        let evaluator = BooleanEvaluator::standard(BooleanLogic::new());
        assert_eq!(
            evaluator.evaluate("true | false -> false & true <-> false"),
            Ok(true)
        );
        assert_eq!(
            evaluator.evaluate("true | false -> false & true <-> !false"),
            Ok(false)
        );
        assert_eq!(evaluator.evaluate("true & false | true <-> true"), Ok(true));
    }

    #[test]
    fn mixed_expression() {
        let bindings = [
            ("A", true),
            ("B", true),
            ("C", false),
            ("D", true),
            ("E", false),
        ];
        assert!(!eval_with(&bindings, "A | B -> C & D <-> !E"));
    }

    #[test]
    fn unknown_literal() {
        let evaluator = BooleanEvaluator::boolean([("A", true)]);
        assert_eq!(
            evaluator.evaluate("A | B"),
            Err(EvalError::UnknownLiteral {
                literal: "B".to_owned()
            })
        );
    }

    #[test]
    fn unknown_operator() {
        let logic = BooleanLogic::new();
        let xor = Operator::binary("^", 3).unwrap();
        assert!(matches!(
            logic.apply_operator(&xor, &[true, false]),
            Err(EvalError::UnknownOperator { symbol }) if symbol == "^"
        ));

        // Shares the symbol of negation but not its arity
        let binary_not = Operator::binary("!", 5).unwrap();
        assert!(matches!(
            logic.apply_operator(&binary_not, &[true, false]),
            Err(EvalError::UnknownOperator { .. })
        ));

        let evaluator = BooleanEvaluator::new(vec![xor], BooleanLogic::new()).unwrap();
        assert!(matches!(
            evaluator.evaluate("true ^ false"),
            Err(EvalError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn wrong_operand_count() {
        let logic = BooleanLogic::new();
        assert!(matches!(
            logic.apply_operator(&LogicOp::And.operator(), &[true]),
            Err(EvalError::InsufficientOperands {
                expected: 2,
                got: 1,
                ..
            })
        ));
        assert_eq!(
            logic.apply_operator(&LogicOp::Not.operator(), &[true, false]),
            Err(EvalError::ExcessOperands {
                symbol: "!".to_owned(),
                expected: 1,
                got: 2
            })
        );
    }
}
