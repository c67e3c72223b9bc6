use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unbalanced brackets, '{symbol}' has no matching counterpart")]
    UnbalancedBrackets { symbol: String },

    #[error("mismatched brackets, '{open}' cannot be closed by '{close}'")]
    MismatchedBracket { open: String, close: String },

    #[error("expression cannot start with the close bracket '{symbol}'")]
    UnexpectedCloseBracket { symbol: String },

    #[error("literal '{literal}' cannot follow literal '{previous}'")]
    ConsecutiveLiterals { previous: String, literal: String },

    #[error("operator '{symbol}' expects {expected} operands but only {got} are available")]
    InsufficientOperands {
        symbol: String,
        expected: usize,
        got: usize,
    },

    #[error("operator '{symbol}' expects {expected} operands but was given {got}")]
    ExcessOperands {
        symbol: String,
        expected: usize,
        got: usize,
    },

    #[error("malformed expression, evaluation left {values} values instead of one")]
    MalformedExpression { values: usize },

    #[error("unknown operator '{symbol}'")]
    UnknownOperator { symbol: String },

    #[error("unknown literal '{literal}'")]
    UnknownLiteral { literal: String },

    #[error("degree of truth of '{literal}' must lie in [0, 1], but is {value}")]
    InvalidDegreeOfTruth { literal: String, value: f64 },

    #[error("invalid bracket '{symbol}'")]
    InvalidBracketKind { symbol: String },

    #[error("invalid operator '{symbol}': {reason}")]
    InvalidOperator { symbol: String, reason: &'static str },

    #[error("cannot match the operator and bracket symbols: {message}")]
    DelimiterPattern { message: String },

    #[error("operator '{symbol}' is defined more than once")]
    DuplicateOperator { symbol: String },
}

pub type EvalResult<T> = Result<T, EvalError>;
