use crate::definitions::{Capacity, N_TOKENS_ON_STACK};
use crate::operators::{OperatorTable, CLOSE_PAREN, OPEN_PAREN};
use crate::tokenizer::{push_bounded, Token, TokenVec};
use crate::{exerr, ErrorKind, ExResult};
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};
use std::slice;

/// Tokens in postfix order, i.e., each operator follows its operands. The end of the
/// sequence is the end of the expression.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// let postfix = rpnex::tokenize_and_convert("3 + 4 * 2")?;
/// assert_eq!(format!("{}", postfix), "3 4 2 * +");
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Postfix {
    tokens: TokenVec,
}

impl Postfix {
    pub fn new(tokens: TokenVec) -> Self {
        Postfix { tokens }
    }

    /// Creates a postfix sequence from whitespace separated symbols, e.g., `"3 4 +"`.
    /// Neither the number nor the length of the symbols is limited, see
    /// [`from_symbols_with_capacity`](Postfix::from_symbols_with_capacity).
    ///
    /// # Errors
    ///
    /// If a symbol contains non-ASCII characters.
    pub fn from_symbols(symbols: &str) -> ExResult<Self> {
        symbols
            .split_whitespace()
            .map(Token::new)
            .collect::<ExResult<TokenVec>>()
            .map(Postfix::new)
    }

    /// Creates a postfix sequence from whitespace separated symbols with the same limits
    /// [`tokenize`](crate::tokenizer::tokenize) applies.
    ///
    /// # Errors
    ///
    /// * a symbol contains non-ASCII characters,
    /// * there are more symbols than `capacity.max_tokens`, or
    /// * a symbol is longer than `capacity.max_token_len`.
    ///
    pub fn from_symbols_with_capacity(symbols: &str, capacity: &Capacity) -> ExResult<Self> {
        let mut tokens = TokenVec::new();
        for symbol in symbols.split_whitespace() {
            push_bounded(&mut tokens, symbol, capacity)?;
        }
        Ok(Postfix::new(tokens))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Display for Postfix {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromIterator<Token> for Postfix {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Postfix::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;
    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Reorders infix tokens into postfix order with the shunting-yard algorithm.
///
/// Tokens that are not operators are passed through as operands. Operators of equal
/// precedence are grouped from the left, also `^`, i.e., `2^3^2` becomes `2 3 ^ 2 ^`.
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind
/// [`UnmatchedParenthesis`](ErrorKind::UnmatchedParenthesis) is returned if
///
/// * a closing parenthesis has no opening counterpart, e.g., `)1+2`, or
/// * an opening parenthesis is never closed, e.g., `(1+2`.
///
pub fn convert<T: Copy>(tokens: &[Token], ops: &OperatorTable<T>) -> ExResult<Postfix> {
    let mut stack = SmallVec::<[&Token; N_TOKENS_ON_STACK]>::new();
    let mut output = TokenVec::new();

    for (i, token) in tokens.iter().enumerate() {
        let symbol = token.as_str();
        if symbol == OPEN_PAREN {
            stack.push(token);
        } else if symbol == CLOSE_PAREN {
            loop {
                match stack.pop() {
                    Some(top) if top.as_str() == OPEN_PAREN => break,
                    Some(top) => output.push(top.clone()),
                    None => {
                        return Err(exerr!(
                            ErrorKind::UnmatchedParenthesis,
                            "closing parenthesis at token {} has no opening counterpart",
                            i
                        ))
                    }
                }
            }
        } else if ops.is_operator(symbol) {
            let prec = ops.precedence(symbol);
            while let Some(top) = stack.last() {
                if top.as_str() == OPEN_PAREN || ops.precedence(top.as_str()) < prec {
                    break;
                }
                output.push((*top).clone());
                stack.pop();
            }
            stack.push(token);
        } else {
            output.push(token.clone());
        }
    }

    while let Some(top) = stack.pop() {
        if top.as_str() == OPEN_PAREN {
            return Err(exerr!(
                ErrorKind::UnmatchedParenthesis,
                "opening parenthesis is never closed"
            ));
        }
        output.push(top.clone());
    }
    Ok(Postfix::new(output))
}
