use crate::definitions::N_TOKENS_ON_STACK;
use crate::operators::{Operator, OperatorTable};
use crate::postfix::Postfix;
use crate::tokenizer::{MatchNumeral, Token};
use crate::tree::ExprTree;
use crate::{exerr, ErrorKind, ExResult};
use smallvec::SmallVec;
use std::str::FromStr;

/// Converts a numeral token into a number.
///
/// # Errors
///
/// If the float parser rejects the token, e.g., `1.2.3` or `.`.
pub fn parse_numeral<T: FromStr>(token: &Token) -> ExResult<T> {
    token.as_str().parse::<T>().map_err(|_| {
        exerr!(
            ErrorKind::InvalidNumber,
            "cannot convert {} into a number",
            token
        )
    })
}

fn find_bin_op<'a, T: Copy>(
    token: &Token,
    ops: &'a OperatorTable<T>,
    pos: usize,
) -> ExResult<&'a Operator<T>> {
    ops.lookup(token.as_str())
        .filter(|op| op.has_bin())
        .ok_or_else(|| {
            exerr!(
                ErrorKind::UnknownOperator,
                "{} at position {} is not an operator that can be evaluated",
                token,
                pos
            )
        })
}

/// Evaluates a postfix sequence with a stack of numbers. Numerals are pushed, operators
/// pop their right and then their left operand and push the result.
///
/// # Errors
///
/// * a numeral cannot be converted, see [`parse_numeral`](parse_numeral),
/// * a non-numeral is not an operator with a binary operation,
/// * an operator finds less than two numbers on the stack, or
/// * the stack does not contain exactly one number at the end.
///
pub fn eval_postfix<T, NM>(postfix: &Postfix, ops: &OperatorTable<T>) -> ExResult<T>
where
    T: Copy + FromStr,
    NM: MatchNumeral,
{
    let mut stack = SmallVec::<[T; N_TOKENS_ON_STACK]>::new();
    for (i, token) in postfix.iter().enumerate() {
        if NM::is_numeral(token.as_str()) {
            stack.push(parse_numeral(token)?);
        } else {
            let op = find_bin_op(token, ops, i)?;
            let (right, left) = match (stack.pop(), stack.pop()) {
                (Some(right), Some(left)) => (right, left),
                _ => {
                    return Err(exerr!(
                        ErrorKind::StackUnderflow,
                        "operator {} at position {} needs two operands",
                        token,
                        i
                    ))
                }
            };
            stack.push(op.apply(left, right)?);
        }
    }
    match stack.as_slice() {
        [result] => Ok(*result),
        [] => Err(exerr!(
            ErrorKind::MalformedExpression,
            "cannot evaluate an empty expression"
        )),
        _ => Err(exerr!(
            ErrorKind::MalformedExpression,
            "{} values are left without operator",
            stack.len()
        )),
    }
}

/// Evaluates a tree by walking its nodes in post-order, hence each operator finds the
/// values of its children already computed. For trees built from well-formed expressions
/// the result coincides with [`eval_postfix`](eval_postfix).
///
/// # Errors
///
/// * a numeral leaf cannot be converted, see [`parse_numeral`](parse_numeral), or
/// * a leaf is not a numeral or an inner node is not an operator with a binary operation.
///
pub fn eval_tree<T, NM>(tree: &ExprTree, ops: &OperatorTable<T>) -> ExResult<T>
where
    T: Copy + FromStr,
    NM: MatchNumeral,
{
    let mut values = SmallVec::<[T; N_TOKENS_ON_STACK]>::with_capacity(tree.len());
    for node in tree.iter() {
        let value = match node.children() {
            Some((left, right)) => {
                let op = find_bin_op(node.value(), ops, node.idx())?;
                op.apply(values[left.idx()], values[right.idx()])?
            }
            None if NM::is_numeral(node.value().as_str()) => parse_numeral(node.value())?,
            None => {
                return Err(exerr!(
                    ErrorKind::UnknownOperator,
                    "leaf {} is not a numeral",
                    node.value()
                ))
            }
        };
        values.push(value);
    }
    values.get(tree.root().idx()).copied().ok_or_else(|| {
        exerr!(
            ErrorKind::MalformedExpression,
            "cannot evaluate an empty tree"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{eval_postfix, eval_tree, parse_numeral};
    use crate::tree::build;
    use crate::util::assert_float_eq_f32;
    use crate::{ErrorKind, ExResult, NumeralMatcher, OperatorTable, Postfix, Token};

    fn eval_symbols(symbols: &str) -> ExResult<f32> {
        let postfix = Postfix::from_symbols(symbols)?;
        eval_postfix::<f32, NumeralMatcher>(&postfix, &OperatorTable::default())
    }

    #[test]
    fn test_parse_numeral() {
        let parse = |s: &str| parse_numeral::<f32>(&Token::new(s).unwrap());
        assert_float_eq_f32(parse("4.").unwrap(), 4.0);
        assert_float_eq_f32(parse(".25").unwrap(), 0.25);
        assert_eq!(parse("1.2.3").unwrap_err().kind(), ErrorKind::InvalidNumber);
        assert_eq!(parse(".").unwrap_err().kind(), ErrorKind::InvalidNumber);
    }

    #[test]
    fn test_eval_postfix() {
        assert_float_eq_f32(eval_symbols("3 4 +").unwrap(), 7.0);
        assert_float_eq_f32(eval_symbols("3 4 -").unwrap(), -1.0);
        assert_float_eq_f32(eval_symbols("1 4 /").unwrap(), 0.25);
        assert_float_eq_f32(eval_symbols("2 3 ^ 2 ^").unwrap(), 64.0);
        assert_float_eq_f32(eval_symbols("2 3 2 ^ ^").unwrap(), 512.0);
        assert_float_eq_f32(eval_symbols("5").unwrap(), 5.0);
    }

    #[test]
    fn test_eval_postfix_errors() {
        fn test(symbols: &str, kind: ErrorKind) {
            let err = eval_symbols(symbols).unwrap_err();
            println!("{}", err);
            assert_eq!(err.kind(), kind);
        }
        test("+", ErrorKind::StackUnderflow);
        test("1 +", ErrorKind::StackUnderflow);
        test("1 2 + *", ErrorKind::StackUnderflow);
        test("1 2 %", ErrorKind::UnknownOperator);
        test("1 2 (", ErrorKind::UnknownOperator);
        test("abc", ErrorKind::UnknownOperator);
        test("1 2", ErrorKind::MalformedExpression);
        test("", ErrorKind::MalformedExpression);
        test("1.2.3 1 +", ErrorKind::InvalidNumber);
    }

    #[test]
    fn test_eval_tree() {
        let table = OperatorTable::<f32>::default();
        for symbols in ["3 4 +", "3 4 2 * 1 5 - 2 ^ 3 ^ / +", "2 3 ^ 2 ^", "10 4 - 2 /"] {
            let postfix = Postfix::from_symbols(symbols).unwrap();
            let tree = build::<f32, NumeralMatcher>(&postfix, &table).unwrap();
            assert_float_eq_f32(
                eval_tree::<f32, NumeralMatcher>(&tree, &table).unwrap(),
                eval_postfix::<f32, NumeralMatcher>(&postfix, &table).unwrap(),
            );
        }
        let postfix = Postfix::from_symbols("abc 1 +").unwrap();
        let tree = build::<f32, NumeralMatcher>(&postfix, &table).unwrap();
        let err = eval_tree::<f32, NumeralMatcher>(&tree, &table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOperator);
    }
}
