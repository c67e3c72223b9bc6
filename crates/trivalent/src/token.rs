use std::fmt::Display;

use crate::operators::Operator;

#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct BracketPair {
    open: String,
    close: String,
}

impl BracketPair {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_owned(),
            close: close.to_owned(),
        }
    }

    pub fn parentheses() -> Self {
        Self::new("(", ")")
    }

    pub fn square() -> Self {
        Self::new("[", "]")
    }

    pub fn curly() -> Self {
        Self::new("{", "}")
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for BracketPair {
    fn default() -> Self {
        Self::parentheses()
    }
}

impl Display for BracketPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.open, self.close)
    }
}

/// A classified piece of an expression, borrowing from the registry that classified it and the
/// expression it was cut from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token<'r, 's> {
    Literal(&'s str),
    Operator(&'r Operator),
    OpenBracket(&'r BracketPair),
    CloseBracket(&'r BracketPair),
}

impl Token<'_, '_> {
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    pub fn is_bracket(&self) -> bool {
        matches!(self, Self::OpenBracket(_) | Self::CloseBracket(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Literal(literal) => literal,
            Self::Operator(op) => op.symbol(),
            Self::OpenBracket(pair) => pair.open(),
            Self::CloseBracket(pair) => pair.close(),
        }
    }
}

impl Display for Token<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "literal {literal}"),
            Self::Operator(op) => write!(f, "operator {op}"),
            Self::OpenBracket(pair) => write!(f, "open {}", pair.open()),
            Self::CloseBracket(pair) => write!(f, "close {}", pair.close()),
        }
    }
}
