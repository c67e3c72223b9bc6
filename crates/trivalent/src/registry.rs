use std::collections::HashMap;

use itertools::Itertools;

use crate::error::{EvalError, EvalResult};
use crate::operators::{LogicOp, Operator};
use crate::token::{BracketPair, Token};

/// The operators and bracket pairs an evaluator understands, keyed by symbol.
#[derive(Debug, Clone)]
pub struct Registry {
    operators: Vec<Operator>,
    by_symbol: HashMap<String, usize>,
    brackets: Vec<BracketPair>,
}

impl Registry {
    pub fn new(operators: Vec<Operator>, brackets: Vec<BracketPair>) -> EvalResult<Self> {
        let mut by_symbol = HashMap::new();
        for (i, op) in operators.iter().enumerate() {
            if by_symbol.insert(op.symbol().to_owned(), i).is_some() {
                return Err(EvalError::DuplicateOperator {
                    symbol: op.symbol().to_owned(),
                });
            }
        }

        let mut bracket_symbols: Vec<&str> = Vec::new();
        for pair in &brackets {
            for symbol in [pair.open(), pair.close()] {
                let malformed = symbol.trim().is_empty() || symbol.trim().len() != symbol.len();
                if malformed
                    || by_symbol.contains_key(symbol)
                    || bracket_symbols.contains(&symbol)
                {
                    return Err(EvalError::InvalidBracketKind {
                        symbol: symbol.to_owned(),
                    });
                }
                bracket_symbols.push(symbol);
            }
        }

        Ok(Self {
            operators,
            by_symbol,
            brackets,
        })
    }

    /// The standard connectives with parentheses.
    pub fn standard() -> Self {
        let operators = LogicOp::operators();
        let by_symbol = operators
            .iter()
            .enumerate()
            .map(|(i, op)| (op.symbol().to_owned(), i))
            .collect();
        Self {
            operators,
            by_symbol,
            brackets: vec![BracketPair::parentheses()],
        }
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn brackets(&self) -> &[BracketPair] {
        &self.brackets
    }

    pub fn operator(&self, symbol: &str) -> Option<&Operator> {
        self.by_symbol.get(symbol).map(|&i| &self.operators[i])
    }

    pub fn is_registered(&self, pair: &BracketPair) -> bool {
        self.brackets.contains(pair)
    }

    /// Every symbol the tokenizer must split on.
    pub fn delimiters(&self) -> Vec<&str> {
        self.operators
            .iter()
            .map(Operator::symbol)
            .chain(self.brackets.iter().flat_map(|pair| [pair.open(), pair.close()]))
            .collect_vec()
    }

    pub fn classify<'r, 's>(&'r self, text: &'s str) -> Token<'r, 's> {
        if let Some(op) = self.operator(text) {
            return Token::Operator(op);
        }
        for pair in &self.brackets {
            if pair.open() == text {
                return Token::OpenBracket(pair);
            }
            if pair.close() == text {
                return Token::CloseBracket(pair);
            }
        }
        Token::Literal(text)
    }
}
