use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Categories of failures that can occur along the pipeline.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorKind {
    /// A `)` without matching `(` or a `(` that is never closed.
    UnmatchedParenthesis,
    /// The postfix sequence does not describe a binary tree.
    MalformedExpression,
    /// An operator was evaluated with less than two values on the stack.
    StackUnderflow,
    /// The input has more tokens than the capacity allows.
    TooManyTokens,
    /// A single token is longer than the capacity allows.
    TokenTooLong,
    /// A symbol where an evaluable operator is expected is not one.
    UnknownOperator,
    /// A numeral token could not be converted into a float.
    InvalidNumber,
    /// Only ASCII input is supported.
    NonAscii,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::UnmatchedParenthesis => "unmatched parenthesis",
            ErrorKind::MalformedExpression => "malformed expression",
            ErrorKind::StackUnderflow => "stack underflow",
            ErrorKind::TooManyTokens => "too many tokens",
            ErrorKind::TokenTooLong => "token too long",
            ErrorKind::UnknownOperator => "unknown operator",
            ErrorKind::InvalidNumber => "invalid number",
            ErrorKind::NonAscii => "non-ascii input",
        };
        write!(f, "{}", name)
    }
}

/// This will be thrown at you if something within rpnex went wrong. Ok, obviously it is not an
/// exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ExError {
    kind: ErrorKind,
    msg: String,
}

impl ExError {
    pub fn new(kind: ErrorKind, msg: &str) -> ExError {
        ExError {
            kind,
            msg: msg.to_string(),
        }
    }
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
impl Error for ExError {}

/// Rpnex' result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates an [`ExError`](ExError) of the given [`ErrorKind`](ErrorKind) with a formatted message.
///
/// ```rust
/// use rpnex::{exerr, ErrorKind};
/// let err = exerr!(ErrorKind::TokenTooLong, "token {} is too long", "123");
/// assert_eq!(err.kind(), ErrorKind::TokenTooLong);
/// assert_eq!(err.msg(), "token 123 is too long");
/// ```
#[macro_export]
macro_rules! exerr {
    ($kind:expr, $s:literal, $( $exps:expr ),*) => {
        $crate::ExError::new($kind, format!($s, $($exps),*).as_str())
    };
    ($kind:expr, $s:literal) => {
        $crate::ExError::new($kind, format!($s).as_str())
    };
}
