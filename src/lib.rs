#![doc(html_root_url = "https://docs.rs/rpnex/0.1.0")]
//! Rpnex is a small arithmetic expression engine. It tokenizes an infix string, converts
//! it into postfix order with the shunting-yard algorithm, builds a binary expression
//! tree, and evaluates expressions to floating point numbers.
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use rpnex::{evaluate, parse, tokenize_and_convert};
//!
//! assert_eq!(evaluate("3 + 4 * 2")?, 11.0);
//! assert_eq!(evaluate("(3 + 4) * 2")?, 14.0);
//! assert_eq!(format!("{}", tokenize_and_convert("(3 + 4) * 2")?), "3 4 + 2 *");
//! assert_eq!(format!("{}", parse("(3 + 4) * 2")?), "((3 + 4) * 2)");
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! The default operators are `+`, `-`, `*`, `/`, and `^` together with parentheses.
//! Operators of equal precedence are grouped from the left, also `^`. Hence,
//! `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2 = 64`. Numerals consist of digits and decimal points.
//! Spaces, tabs, carriage returns, and commas separate tokens.
//!
//! The functions of the crate root work with `f32` and the default operators. To use
//! `f64`, custom operators, or other capacity limits, create a [`Calculator`](Calculator).
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use rpnex::{Calculator, Capacity};
//!
//! let calc = Calculator::<f64>::with_capacity(Capacity {
//!     max_tokens: 1024,
//!     max_token_len: 32,
//! });
//! let long_sum = vec!["1"; 500].join(" + ");
//! assert_eq!(calc.evaluate(&long_sum)?, 500.0);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! Failures are reported as [`ExError`](ExError)s whose [`ErrorKind`](ErrorKind) tells
//! what went wrong.
//!
//! ```rust
//! use rpnex::{evaluate, parse, ErrorKind};
//!
//! assert_eq!(parse(")1 + 2").unwrap_err().kind(), ErrorKind::UnmatchedParenthesis);
//! assert_eq!(parse("(1 + 2").unwrap_err().kind(), ErrorKind::UnmatchedParenthesis);
//! assert_eq!(evaluate("1 + * 2").unwrap_err().kind(), ErrorKind::StackUnderflow);
//! assert!(evaluate("10 / 0").unwrap().is_infinite());
//! ```
use lazy_static::lazy_static;

mod calculator;
mod definitions;
pub mod eval;
mod operators;
pub mod postfix;
mod result;
#[cfg(feature = "serde")]
mod serde;
pub mod tokenizer;
pub mod tree;
mod util;

pub use {
    calculator::Calculator,
    definitions::{Capacity, DEFAULT_MAX_TOKENS, DEFAULT_MAX_TOKEN_LEN, UNKNOWN_OPERATOR_PREC},
    operators::{DefaultOpsFactory, MakeOperators, Operator, OperatorTable},
    postfix::Postfix,
    result::{ErrorKind, ExError, ExResult},
    tokenizer::{is_numeral, MatchNumeral, NumeralMatcher, Token, TokenVec},
    tree::{ExprTree, NodeIdx, NodeRef},
};

lazy_static! {
    static ref DEFAULT_CALCULATOR: Calculator<f32> = Calculator::new();
}

/// Splits `text` into tokens with the default operators.
///
/// # Errors
///
/// See [`tokenize`](tokenizer::tokenize).
pub fn tokenize(text: &str) -> ExResult<TokenVec> {
    DEFAULT_CALCULATOR.tokenize(text)
}

/// Returns the postfix sequence of `text`, e.g., `3 4 2 * +` for `3 + 4 * 2`.
///
/// # Errors
///
/// See [`tokenize`](tokenizer::tokenize) and [`convert`](postfix::convert).
pub fn tokenize_and_convert(text: &str) -> ExResult<Postfix> {
    DEFAULT_CALCULATOR.tokenize_and_convert(text)
}

/// Builds the expression tree of a postfix sequence.
///
/// # Errors
///
/// See [`build`](tree::build).
pub fn build(postfix: &Postfix) -> ExResult<ExprTree> {
    DEFAULT_CALCULATOR.build(postfix)
}

/// Parses `text` into an expression tree.
///
/// # Errors
///
/// See [`tokenize_and_convert`](tokenize_and_convert) and [`build`](tree::build).
pub fn parse(text: &str) -> ExResult<ExprTree> {
    DEFAULT_CALCULATOR.parse(text)
}

/// Evaluates an expression tree with the default operators.
///
/// # Errors
///
/// See [`eval_tree`](eval::eval_tree).
pub fn eval_tree(tree: &ExprTree) -> ExResult<f32> {
    DEFAULT_CALCULATOR.eval_tree(tree)
}

/// Evaluates `text` to an `f32`.
///
/// # Errors
///
/// See [`tokenize_and_convert`](tokenize_and_convert) and
/// [`eval_postfix`](eval::eval_postfix).
pub fn evaluate(text: &str) -> ExResult<f32> {
    DEFAULT_CALCULATOR.evaluate(text)
}

#[cfg(test)]
mod tests {
    use crate::{evaluate, parse, tokenize, util::assert_float_eq_f32};

    #[test]
    fn test_evaluate() {
        assert_float_eq_f32(evaluate("3 + 4").unwrap(), 7.0);
        assert_float_eq_f32(evaluate("3 + 4 * 2").unwrap(), 11.0);
        assert_float_eq_f32(evaluate("(3 + 4) * 2").unwrap(), 14.0);
        assert_float_eq_f32(evaluate("2 ^ 3 ^ 2").unwrap(), 64.0);
        assert!(evaluate("1 +").is_err());
        assert!(evaluate("").is_err());
    }

    #[test]
    fn test_default_calculator_is_stateless() {
        let first = evaluate("1.5 * (2 - 0.25) / 3").unwrap();
        let second = evaluate("1.5 * (2 - 0.25) / 3").unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(tokenize("1+2").unwrap().len(), 3);
        assert_eq!(parse("1+2").unwrap().len(), 3);
    }
}
