use std::collections::HashMap;

use crate::engine::Evaluator;
use crate::error::{EvalError, EvalResult};
use crate::logic::{Logic, connective, operand_mismatch};
use crate::operators::{LogicOp, Operator};

/// Many-valued logic over degrees of truth in [0, 1], with Zadeh's min and max connectives.
///
/// There are no constant literals, every name must be bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuzzyLogic {
    bindings: HashMap<String, f64>,
}

impl FuzzyLogic {
    pub fn new<K: Into<String>>(bindings: impl IntoIterator<Item = (K, f64)>) -> EvalResult<Self> {
        let mut checked = HashMap::new();
        for (name, value) in bindings {
            let name = name.into();
            if !is_degree_of_truth(value) {
                return Err(EvalError::InvalidDegreeOfTruth {
                    literal: name,
                    value,
                });
            }
            checked.insert(name, value);
        }
        Ok(Self { bindings: checked })
    }

    pub fn bindings(&self) -> &HashMap<String, f64> {
        &self.bindings
    }
}

pub fn is_degree_of_truth(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn negation(a: f64) -> f64 {
    1.0 - a
}

impl Logic for FuzzyLogic {
    type Value = f64;

    fn resolve_literal(&self, literal: &str) -> EvalResult<f64> {
        self.bindings
            .get(literal)
            .copied()
            .ok_or_else(|| EvalError::UnknownLiteral {
                literal: literal.to_owned(),
            })
    }

    fn apply_operator(&self, op: &Operator, operands: &[f64]) -> EvalResult<f64> {
        use LogicOp::*;
        Ok(match (connective(op)?, operands) {
            (Not, &[a]) => negation(a),
            (And, &[a, b]) => a.min(b),
            (Or, &[a, b]) => a.max(b),
            (Implies, &[a, b]) => a.min(b).max(negation(a)),
            (Equiv, &[a, b]) => negation(a).max(b).min(negation(a).max(negation(b))),
            _ => return Err(operand_mismatch(op, operands)),
        })
    }
}

pub type FuzzyEvaluator = Evaluator<FuzzyLogic>;

impl Evaluator<FuzzyLogic> {
    pub fn fuzzy<K: Into<String>>(
        bindings: impl IntoIterator<Item = (K, f64)>,
    ) -> EvalResult<Self> {
        Ok(Self::standard(FuzzyLogic::new(bindings)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_with(bindings: &[(&str, f64)], expression: &str) -> f64 {
        FuzzyEvaluator::fuzzy(bindings.iter().copied())
            .unwrap()
            .evaluate(expression)
            .unwrap()
    }

    fn assert_close(got: f64, expected: f64) {
        assert!(
            (got - expected).abs() < 1e-12,
            "expected {expected}, got {got}"
        );
    }

    #[test]
    fn negation() {
        assert_close(eval_with(&[("A", 0.1)], "!A"), 0.9);
        assert_close(eval_with(&[("A", 0.6)], "!A"), 0.4);
    }

    #[test]
    fn and_or() {
        assert_close(eval_with(&[("A", 0.2), ("B", 0.4)], "A & B"), 0.2);
        assert_close(eval_with(&[("A", 0.3), ("B", 0.5)], "A & B"), 0.3);
        assert_close(eval_with(&[("A", 0.2), ("B", 0.4)], "A | B"), 0.4);
        assert_close(eval_with(&[("A", 0.3), ("B", 0.5)], "A | B"), 0.5);
    }

    #[test]
    fn implication() {
        assert_close(eval_with(&[("A", 0.2), ("B", 0.4)], "A -> B"), 0.8);
        assert_close(eval_with(&[("A", 0.3), ("B", 0.5)], "A -> B"), 0.7);
    }

    #[test]
    fn equivalence() {
        assert_close(eval_with(&[("A", 0.1), ("B", 0.9)], "A <-> B"), 0.9);
        assert_close(eval_with(&[("A", 0.6), ("B", 0.5)], "A <-> B"), 0.5);
    }

    #[test]
    fn mixed_expression() {
        let bindings = [("A", 0.1), ("B", 0.8), ("C", 0.4), ("D", 0.9), ("E", 0.8)];
        assert_close(eval_with(&bindings, "A | B -> C & D <-> !E"), 0.6);
    }

    #[test]
    fn crisp_degrees_agree_with_boolean() {
        let cases = ["!A", "A & B", "A | B", "A -> B", "!(A -> B) | A & !B"];
        for expression in cases {
            for (a, b) in [(true, true), (true, false), (false, true), (false, false)] {
                let crisp =
                    crate::BooleanEvaluator::boolean([("A", a), ("B", b)]).evaluate(expression);
                let degree = eval_with(
                    &[("A", f64::from(u8::from(a))), ("B", f64::from(u8::from(b)))],
                    expression,
                );
                assert_eq!(crisp, Ok(degree == 1.0), "{expression} with A={a}, B={b}");
            }
        }
    }

    #[test]
    fn no_constant_literals() {
        let evaluator = FuzzyEvaluator::fuzzy([("A", 0.5)]).unwrap();
        assert!(matches!(
            evaluator.evaluate("A | true"),
            Err(EvalError::UnknownLiteral { literal }) if literal == "true"
        ));
    }

    #[test]
    fn unknown_literal() {
        let evaluator = FuzzyEvaluator::fuzzy([("A", 0.5)]).unwrap();
        assert!(matches!(
            evaluator.evaluate("A | B"),
            Err(EvalError::UnknownLiteral { literal }) if literal == "B"
        ));
    }

    #[test]
    fn wrong_operand_count() {
        let logic = FuzzyLogic::new([("A", 0.5)]).unwrap();
        assert!(matches!(
            logic.apply_operator(&LogicOp::Or.operator(), &[0.5, 0.1, 0.2]),
            Err(EvalError::ExcessOperands { expected: 2, got: 3, .. })
        ));
        assert!(matches!(
            logic.apply_operator(&LogicOp::Not.operator(), &[]),
            Err(EvalError::InsufficientOperands { expected: 1, got: 0, .. })
        ));
    }

    #[test]
    fn invalid_degree_of_truth() {
        assert_eq!(
            FuzzyLogic::new([("A", 0.5), ("B", 12.0)]).unwrap_err(),
            EvalError::InvalidDegreeOfTruth {
                literal: "B".to_owned(),
                value: 12.0
            }
        );
        assert!(FuzzyEvaluator::fuzzy([("A", -0.1)]).is_err());
        assert!(FuzzyEvaluator::fuzzy([("A", f64::NAN)]).is_err());
        assert!(FuzzyEvaluator::fuzzy([("A", 0.0), ("B", 1.0)]).is_ok());
    }
}
