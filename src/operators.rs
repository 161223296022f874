use crate::definitions::UNKNOWN_OPERATOR_PREC;
use crate::{exerr, ErrorKind, ExResult};
use num::Float;
use smallvec::SmallVec;
use std::marker::PhantomData;

pub const OPEN_PAREN: &str = "(";
pub const CLOSE_PAREN: &str = ")";

const N_OPS_ON_STACK: usize = 16;

/// Operators can be custom-defined by the library-user in terms of this struct.
#[derive(Copy, Clone, Debug)]
pub struct Operator<T: Copy> {
    /// Representation of the operator in the string to be parsed, e.g., `-` or `^`.
    pub repr: &'static str,
    /// Precedence of the operator. An operator with a higher number binds tighter. For
    /// instance, in a sane world `*` has a higher precedence than `+`.
    pub prec: i32,
    /// Implementation of the binary operation, e.g., `|a, b| a * b` for multiplication.
    /// Parentheses do not have one.
    pub bin_op: Option<fn(T, T) -> T>,
}

impl<T: Copy> Operator<T> {
    pub fn repr(&self) -> &'static str {
        self.repr
    }
    pub fn has_bin(&self) -> bool {
        self.bin_op.is_some()
    }
    pub fn is_paren(&self) -> bool {
        self.repr == OPEN_PAREN || self.repr == CLOSE_PAREN
    }
    /// Applies the binary operation to the operands `left` and `right` in this order.
    ///
    /// # Errors
    ///
    /// If the operator has no binary operation, e.g., parentheses.
    pub fn apply(&self, left: T, right: T) -> ExResult<T> {
        match self.bin_op {
            Some(f) => Ok(f(left, right)),
            None => Err(exerr!(
                ErrorKind::UnknownOperator,
                "operator {} cannot be evaluated",
                self.repr
            )),
        }
    }
}

/// To use custom operators one needs to create a factory that implements this trait.
///
/// # Example
///
/// ```rust
/// use rpnex::{MakeOperators, Operator};
/// #[derive(Clone)]
/// struct ModuloOpsFactory;
/// impl MakeOperators<f32> for ModuloOpsFactory {
///     fn make() -> Vec<Operator<f32>> {
///         vec![
///             Operator { repr: "(", prec: 0, bin_op: None },
///             Operator { repr: ")", prec: 1, bin_op: None },
///             Operator { repr: "+", prec: 1, bin_op: Some(|a, b| a + b) },
///             Operator { repr: "%", prec: 2, bin_op: Some(|a, b| a % b) },
///         ]
///     }
/// }
/// ```
pub trait MakeOperators<T: Copy>: Clone {
    /// Function that creates a vector of operators. The order matters, since the
    /// first operator that matches a symbol wins.
    fn make() -> Vec<Operator<T>>;
}

/// Factory of the default operators `( ) - + * / ^` for floating point values.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct DefaultOpsFactory<T: Float> {
    dummy: PhantomData<T>,
}

impl<T: Float> MakeOperators<T> for DefaultOpsFactory<T> {
    /// Returns the default operators.
    fn make() -> Vec<Operator<T>> {
        vec![
            Operator {
                repr: OPEN_PAREN,
                prec: 0,
                bin_op: None,
            },
            Operator {
                repr: CLOSE_PAREN,
                prec: 1,
                bin_op: None,
            },
            Operator {
                repr: "-",
                prec: 1,
                bin_op: Some(|a, b| a - b),
            },
            Operator {
                repr: "+",
                prec: 1,
                bin_op: Some(|a, b| a + b),
            },
            Operator {
                repr: "*",
                prec: 2,
                bin_op: Some(|a, b| a * b),
            },
            Operator {
                repr: "/",
                prec: 2,
                bin_op: Some(|a, b| a / b),
            },
            Operator {
                repr: "^",
                prec: 3,
                bin_op: Some(|a: T, b| a.powf(b)),
            },
        ]
    }
}

/// Immutable registry of operators. It is created once from a
/// [`MakeOperators`](MakeOperators) factory and only read afterwards.
#[derive(Clone, Debug)]
pub struct OperatorTable<T: Copy> {
    ops: SmallVec<[Operator<T>; N_OPS_ON_STACK]>,
}

impl<T: Copy> OperatorTable<T> {
    pub fn new(ops: Vec<Operator<T>>) -> Self {
        OperatorTable {
            // an empty representation would match everywhere
            ops: ops.into_iter().filter(|op| !op.repr.is_empty()).collect(),
        }
    }

    pub fn from_factory<OF: MakeOperators<T>>() -> Self {
        Self::new(OF::make())
    }

    /// Returns the first operator in declaration order whose representation is a
    /// prefix of `symbol`.
    pub fn lookup(&self, symbol: &str) -> Option<&Operator<T>> {
        self.ops.iter().find(|op| symbol.starts_with(op.repr))
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Precedence of the operator that equals `symbol` or
    /// [`UNKNOWN_OPERATOR_PREC`](crate::UNKNOWN_OPERATOR_PREC) if there is none.
    pub fn precedence(&self, symbol: &str) -> i32 {
        self.ops
            .iter()
            .find(|op| op.repr == symbol)
            .map_or(UNKNOWN_OPERATOR_PREC, |op| op.prec)
    }

    /// Applies the operator looked up by `symbol` to `left` and `right`.
    ///
    /// # Errors
    ///
    /// If there is no such operator or if it cannot be evaluated such as parentheses.
    pub fn evaluate(&self, symbol: &str, left: T, right: T) -> ExResult<T> {
        match self.lookup(symbol) {
            Some(op) => op.apply(left, right),
            None => Err(exerr!(
                ErrorKind::UnknownOperator,
                "{} is not a known operator",
                symbol
            )),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator<T>> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl<T: Float> Default for OperatorTable<T> {
    fn default() -> Self {
        Self::from_factory::<DefaultOpsFactory<T>>()
    }
}
