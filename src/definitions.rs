/// Tokens, operator stacks, and node stacks up to this size live on the stack.
pub const N_TOKENS_ON_STACK: usize = 32;

/// Characters of a token that are stored inline before spilling to the heap.
pub const N_TOKEN_CHARS_ON_STACK: usize = 16;

/// Default maximal number of tokens of one expression.
pub const DEFAULT_MAX_TOKENS: usize = 64;

/// Default maximal number of characters of one token.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 64;

/// Precedence of symbols that are not in the operator table. It is larger than
/// every real precedence such that unknown operators are always pushed.
pub const UNKNOWN_OPERATOR_PREC: i32 = 256;

/// Characters that delimit tokens without being emitted.
pub const SEPARATORS: [char; 4] = [' ', '\t', '\r', ','];

/// Limits of the token buffers of one evaluation.
///
/// ```rust
/// use rpnex::{Calculator, Capacity, ErrorKind};
/// let calc = Calculator::<f32>::with_capacity(Capacity {
///     max_tokens: 3,
///     ..Capacity::default()
/// });
/// assert_eq!(calc.evaluate("1 + 2").unwrap(), 3.0);
/// assert_eq!(
///     calc.evaluate("1 + 2 + 3").unwrap_err().kind(),
///     ErrorKind::TooManyTokens
/// );
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Capacity {
    pub max_tokens: usize,
    pub max_token_len: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity {
            max_tokens: DEFAULT_MAX_TOKENS,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }
}
