use log::{debug, trace};

use crate::error::{EvalError, EvalResult};
use crate::logic::Logic;
use crate::operators::Operator;
use crate::registry::Registry;
use crate::token::{BracketPair, Token};
use crate::tokenizer::Tokenizer;

/// Shunting-yard evaluator of infix expressions in the value domain of `L`.
///
/// The evaluator holds no per-call state, so one instance can serve any number of `evaluate`
/// calls, from several threads if `L` allows it.
#[derive(Debug, Clone)]
pub struct Evaluator<L> {
    registry: Registry,
    tokenizer: Tokenizer,
    logic: L,
}

impl<L: Logic> Evaluator<L> {
    /// Evaluator over `operators` with parentheses for grouping.
    pub fn new(operators: Vec<Operator>, logic: L) -> EvalResult<Self> {
        Self::with_brackets(operators, vec![BracketPair::parentheses()], logic)
    }

    pub fn with_brackets(
        operators: Vec<Operator>,
        brackets: Vec<BracketPair>,
        logic: L,
    ) -> EvalResult<Self> {
        let registry = Registry::new(operators, brackets)?;
        let tokenizer = Tokenizer::new(registry.delimiters())?;
        Ok(Self {
            registry,
            tokenizer,
            logic,
        })
    }

    /// Evaluator over the standard connectives with parentheses for grouping.
    pub fn standard(logic: L) -> Self {
        Self {
            registry: Registry::standard(),
            tokenizer: Tokenizer::standard(),
            logic,
        }
    }

    pub fn logic(&self) -> &L {
        &self.logic
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn tokens<'s>(&self, expression: &'s str) -> impl Iterator<Item = Token<'_, 's>> {
        self.tokenizer
            .tokenize(expression)
            .map(move |text| self.registry.classify(text))
    }

    pub fn evaluate(&self, expression: &str) -> EvalResult<L::Value> {
        debug!("evaluating {expression:?}");

        let mut values: Vec<L::Value> = Vec::new();
        let mut stack: Vec<Token<'_, '_>> = Vec::new();
        let mut previous: Option<Token<'_, '_>> = None;

        for token in self.tokens(expression) {
            trace!("token {token}, {} values, {} on stack", values.len(), stack.len());
            match token {
                Token::OpenBracket(pair) => {
                    if !self.registry.is_registered(pair) {
                        return Err(EvalError::InvalidBracketKind {
                            symbol: pair.open().to_owned(),
                        });
                    }
                    stack.push(token);
                }
                Token::CloseBracket(pair) => {
                    if previous.is_none() {
                        return Err(EvalError::UnexpectedCloseBracket {
                            symbol: pair.close().to_owned(),
                        });
                    }
                    self.close_group(pair, &mut values, &mut stack)?;
                }
                Token::Operator(op) => {
                    while let Some(Token::Operator(top)) = stack.last().copied() {
                        if !top.binds_before(op) {
                            break;
                        }
                        stack.pop();
                        self.apply(top, &mut values)?;
                    }
                    stack.push(token);
                }
                Token::Literal(literal) => {
                    if let Some(Token::Literal(prev)) = previous {
                        return Err(EvalError::ConsecutiveLiterals {
                            previous: prev.to_owned(),
                            literal: literal.to_owned(),
                        });
                    }
                    self.output(token, &mut values)?;
                }
            }
            previous = Some(token);
        }

        while let Some(token) = stack.pop() {
            self.output(token, &mut values)?;
        }

        let count = values.len();
        match values.pop() {
            Some(value) if count == 1 => {
                debug!("{expression:?} evaluated to {value:?}");
                Ok(value)
            }
            _ => Err(EvalError::MalformedExpression { values: count }),
        }
    }

    /// Unwinds the operator stack down to the open bracket matching `pair`.
    fn close_group(
        &self,
        pair: &BracketPair,
        values: &mut Vec<L::Value>,
        stack: &mut Vec<Token<'_, '_>>,
    ) -> EvalResult<()> {
        loop {
            match stack.pop() {
                Some(Token::OpenBracket(open)) if open == pair => return Ok(()),
                Some(Token::OpenBracket(open)) => {
                    return Err(EvalError::MismatchedBracket {
                        open: open.open().to_owned(),
                        close: pair.close().to_owned(),
                    });
                }
                Some(token) => self.output(token, values)?,
                None => {
                    return Err(EvalError::UnbalancedBrackets {
                        symbol: pair.close().to_owned(),
                    });
                }
            }
        }
    }

    /// Folds a token into the value stack.
    fn output(&self, token: Token<'_, '_>, values: &mut Vec<L::Value>) -> EvalResult<()> {
        match token {
            Token::Literal(literal) => {
                let value = self.logic.resolve_literal(literal)?;
                trace!("literal {literal} resolved to {value:?}");
                values.push(value);
                Ok(())
            }
            Token::Operator(op) => self.apply(op, values),
            Token::OpenBracket(_) | Token::CloseBracket(_) => Err(EvalError::UnbalancedBrackets {
                symbol: token.text().to_owned(),
            }),
        }
    }

    fn apply(&self, op: &Operator, values: &mut Vec<L::Value>) -> EvalResult<()> {
        let count = op.operand_count();
        if values.len() < count {
            return Err(EvalError::InsufficientOperands {
                symbol: op.symbol().to_owned(),
                expected: count,
                got: values.len(),
            });
        }
        let operands = values.split_off(values.len() - count);
        let result = self.logic.apply_operator(op, &operands)?;
        trace!("{op} applied to {operands:?} gave {result:?}");
        values.push(result);
        Ok(())
    }
}
