//! Evaluation of infix logic expressions with the shunting-yard algorithm.
//!
//! An [`Evaluator`] splits an expression on the symbols of its operators and brackets, orders
//! the operators by precedence and hands literals and operator applications to a [`Logic`],
//! which decides what values mean. Classical logic lives in [`BooleanLogic`] and many-valued
//! logic over degrees of truth in [`FuzzyLogic`].
//!
//! ```
//! use trivalent::BooleanEvaluator;
//!
//! let evaluator = BooleanEvaluator::boolean([("A", true), ("B", false)]);
//! assert_eq!(evaluator.evaluate("A & !(B | false)"), Ok(true));
//! ```

pub mod boolean;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod logic;
pub mod operators;
pub mod registry;
pub mod token;
pub mod tokenizer;

pub use boolean::{BooleanEvaluator, BooleanLogic};
pub use engine::Evaluator;
pub use error::{EvalError, EvalResult};
pub use fuzzy::{FuzzyEvaluator, FuzzyLogic};
pub use logic::Logic;
pub use operators::{Arity, LogicOp, Operator};
pub use registry::Registry;
pub use token::{BracketPair, Token};
pub use tokenizer::Tokenizer;
