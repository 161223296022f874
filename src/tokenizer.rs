use crate::definitions::{Capacity, N_TOKENS_ON_STACK, N_TOKEN_CHARS_ON_STACK, SEPARATORS};
use crate::operators::OperatorTable;
use crate::{exerr, ErrorKind, ExResult};
use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt::{self, Debug, Display, Formatter};

pub type TokenVec = SmallVec<[Token; N_TOKENS_ON_STACK]>;

/// A lexical unit, i.e., a numeral or an operator symbol. The characters are ASCII and
/// are stored inline for short tokens.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    text: SmallVec<[u8; N_TOKEN_CHARS_ON_STACK]>,
}

impl Token {
    /// Creates a token from its text. The length is not limited here, only
    /// [`tokenize`](tokenize) and
    /// [`Postfix::from_symbols_with_capacity`](crate::Postfix::from_symbols_with_capacity)
    /// check a [`Capacity`](crate::Capacity).
    ///
    /// # Errors
    ///
    /// If `text` contains non-ASCII characters.
    pub fn new(text: &str) -> ExResult<Token> {
        if !text.is_ascii() {
            return Err(exerr!(
                ErrorKind::NonAscii,
                "token {} contains non-ascii characters",
                text
            ));
        }
        Ok(Token {
            text: SmallVec::from_slice(text.as_bytes()),
        })
    }

    pub fn as_str(&self) -> &str {
        // tokens are created from ascii strings only
        std::str::from_utf8(&self.text).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Token({:?})", self.as_str())
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Implement this trait to decide which tokens are numerals.
pub trait MatchNumeral {
    /// Returns `true` if the complete token `text` is a numeral.
    fn is_numeral(text: &str) -> bool;
}

/// Default numeral matcher, see [`is_numeral`](is_numeral).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct NumeralMatcher;
impl MatchNumeral for NumeralMatcher {
    fn is_numeral(text: &str) -> bool {
        is_numeral(text)
    }
}

/// Helper to implement a struct called `$matcher_name` that implements
/// [`MatchNumeral`](MatchNumeral) and matches tokens that completely match the regex
/// pattern `$regex_pattern`.
///
/// For instance, to accept only numerals with at most one decimal point one can create a
/// struct with name `StrictMatcher` via
/// ```rust
/// use rpnex::{numeral_matcher_from_pattern, MatchNumeral};
/// numeral_matcher_from_pattern!(StrictMatcher, r"[0-9]*\.?[0-9]*");
/// assert!(StrictMatcher::is_numeral("1.5"));
/// assert!(!StrictMatcher::is_numeral("1.5.1"));
/// ```
#[macro_export]
macro_rules! numeral_matcher_from_pattern {
    ($matcher_name:ident, $regex_pattern:literal) => {
        /// Numeral matcher type that was created with the macro
        /// [`numeral_matcher_from_pattern`](numeral_matcher_from_pattern).
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
        pub struct $matcher_name;
        impl MatchNumeral for $matcher_name {
            fn is_numeral(text: &str) -> bool {
                lazy_static::lazy_static! {
                    static ref RE_NUMERAL_EXACT: regex::Regex =
                        regex::Regex::new(concat!("^(?:", $regex_pattern, ")$")).unwrap();
                }
                RE_NUMERAL_EXACT.is_match(text)
            }
        }
    };
}

/// A token is a numeral iff it is not empty and consists of digits and decimal points
/// only. Neither signs nor exponents are accepted. The number of decimal points is not
/// restricted, `1.2.3` is a numeral that fails later on conversion.
pub fn is_numeral(text: &str) -> bool {
    lazy_static! {
        static ref RE_NUMERAL: Regex = Regex::new(r"^[0-9.]+$").unwrap();
    }
    RE_NUMERAL.is_match(text)
}

fn is_separator(c: u8) -> bool {
    SEPARATORS.contains(&(c as char))
}

/// Appends `word` to `tokens` if neither the token count nor the token length exceeds
/// `capacity`.
pub(crate) fn push_bounded(
    tokens: &mut TokenVec,
    word: &str,
    capacity: &Capacity,
) -> ExResult<()> {
    if word.len() > capacity.max_token_len {
        return Err(exerr!(
            ErrorKind::TokenTooLong,
            "token {} has more than {} characters",
            word,
            capacity.max_token_len
        ));
    }
    if tokens.len() >= capacity.max_tokens {
        return Err(exerr!(
            ErrorKind::TooManyTokens,
            "more than {} tokens at {}",
            capacity.max_tokens,
            word
        ));
    }
    tokens.push(Token::new(word)?);
    Ok(())
}

/// Splits a text into numerals, operators, and parentheses.
///
/// Operators are recognized at every position before characters are accumulated into a
/// word, i.e., `12+3` consists of three tokens. Separators end the current word and are
/// dropped.
///
/// # Arguments
///
/// * `text` - text to be tokenized
/// * `ops` - operators that are recognized, the first match in table order wins
/// * `capacity` - limits of the number of tokens and of the length of each token
///
/// # Errors
///
/// * the text contains non-ASCII characters,
/// * there are more tokens than `capacity.max_tokens`, or
/// * a token is longer than `capacity.max_token_len`.
///
pub fn tokenize<T: Copy>(
    text: &str,
    ops: &OperatorTable<T>,
    capacity: &Capacity,
) -> ExResult<TokenVec> {
    if !text.is_ascii() {
        return Err(exerr!(
            ErrorKind::NonAscii,
            "only ascii characters are supported, got {}",
            text
        ));
    }

    let mut tokens = TokenVec::new();
    let bytes = text.as_bytes();
    let mut word_start: Option<usize> = None;
    let mut offset = 0usize;
    while offset < bytes.len() {
        let text_rest = &text[offset..];
        if is_separator(bytes[offset]) {
            if let Some(start) = word_start.take() {
                push_bounded(&mut tokens, &text[start..offset], capacity)?;
            }
            offset += 1;
        } else if let Some(op) = ops.lookup(text_rest) {
            if let Some(start) = word_start.take() {
                push_bounded(&mut tokens, &text[start..offset], capacity)?;
            }
            push_bounded(&mut tokens, op.repr, capacity)?;
            offset += op.repr.len();
        } else {
            if word_start.is_none() {
                word_start = Some(offset);
            }
            offset += 1;
        }
    }
    if let Some(start) = word_start {
        push_bounded(&mut tokens, &text[start..], capacity)?;
    }
    Ok(tokens)
}
