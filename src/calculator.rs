use crate::definitions::Capacity;
use crate::operators::{DefaultOpsFactory, MakeOperators, OperatorTable};
use crate::postfix::{self, Postfix};
use crate::tokenizer::{self, MatchNumeral, NumeralMatcher, TokenVec};
use crate::tree::{self, ExprTree};
use crate::{eval, ExResult};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::str::FromStr;

/// Bundles the operator table, the numeral matcher, and the capacity limits that all
/// steps of the pipeline text → tokens → postfix → (tree | number) share.
///
/// The operator table is created once when the calculator is created and never changes
/// afterwards. Since a calculator does not have mutable state, one instance can be used
/// for many evaluations, also from many threads.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use rpnex::Calculator;
///
/// let calc = Calculator::<f64>::new();
/// let tree = calc.parse("(3 + 4) * 2")?;
/// assert_eq!(format!("{}", tree), "((3 + 4) * 2)");
/// assert!((calc.eval_tree(&tree)? - 14.0).abs() < 1e-12);
/// assert!((calc.evaluate("(3 + 4) * 2")? - 14.0).abs() < 1e-12);
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Calculator<T, OF = DefaultOpsFactory<T>, NM = NumeralMatcher>
where
    T: Copy + Debug,
    OF: MakeOperators<T>,
    NM: MatchNumeral,
{
    ops: OperatorTable<T>,
    capacity: Capacity,
    dummy: PhantomData<(OF, NM)>,
}

impl<T, OF, NM> Calculator<T, OF, NM>
where
    T: Copy + Debug,
    OF: MakeOperators<T>,
    NM: MatchNumeral,
{
    pub fn new() -> Self {
        Self::with_capacity(Capacity::default())
    }

    pub fn with_capacity(capacity: Capacity) -> Self {
        Calculator {
            ops: OperatorTable::from_factory::<OF>(),
            capacity,
            dummy: PhantomData,
        }
    }

    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    pub fn operators(&self) -> &OperatorTable<T> {
        &self.ops
    }

    pub fn is_numeral(&self, text: &str) -> bool {
        NM::is_numeral(text)
    }

    /// Splits `text` into tokens, see [`tokenize`](crate::tokenizer::tokenize).
    pub fn tokenize(&self, text: &str) -> ExResult<TokenVec> {
        tokenizer::tokenize(text, &self.ops, &self.capacity)
    }

    /// Tokenizes `text` and reorders the tokens into postfix order.
    ///
    /// # Errors
    ///
    /// See [`tokenize`](crate::tokenizer::tokenize) and [`convert`](crate::postfix::convert).
    pub fn tokenize_and_convert(&self, text: &str) -> ExResult<Postfix> {
        let tokens = self.tokenize(text)?;
        postfix::convert(&tokens, &self.ops)
    }

    /// Reads a postfix sequence of whitespace separated symbols within the capacity of
    /// the calculator, see
    /// [`from_symbols_with_capacity`](crate::Postfix::from_symbols_with_capacity).
    pub fn postfix_from_symbols(&self, symbols: &str) -> ExResult<Postfix> {
        Postfix::from_symbols_with_capacity(symbols, &self.capacity)
    }

    /// Builds the expression tree of a postfix sequence, see [`build`](crate::tree::build).
    pub fn build(&self, postfix: &Postfix) -> ExResult<ExprTree> {
        tree::build::<T, NM>(postfix, &self.ops)
    }

    /// Parses `text` into an expression tree that is owned by the caller.
    pub fn parse(&self, text: &str) -> ExResult<ExprTree> {
        let postfix = self.tokenize_and_convert(text)?;
        self.build(&postfix)
    }

    /// Evaluates a postfix sequence, see [`eval_postfix`](crate::eval::eval_postfix).
    pub fn eval_postfix(&self, postfix: &Postfix) -> ExResult<T>
    where
        T: FromStr,
    {
        eval::eval_postfix::<T, NM>(postfix, &self.ops)
    }

    /// Evaluates a tree, see [`eval_tree`](crate::eval::eval_tree).
    pub fn eval_tree(&self, tree: &ExprTree) -> ExResult<T>
    where
        T: FromStr,
    {
        eval::eval_tree::<T, NM>(tree, &self.ops)
    }

    /// Evaluates `text` directly on its postfix sequence without building a tree.
    pub fn evaluate(&self, text: &str) -> ExResult<T>
    where
        T: FromStr,
    {
        let postfix = self.tokenize_and_convert(text)?;
        self.eval_postfix(&postfix)
    }
}

impl<T, OF, NM> Default for Calculator<T, OF, NM>
where
    T: Copy + Debug,
    OF: MakeOperators<T>,
    NM: MatchNumeral,
{
    fn default() -> Self {
        Self::new()
    }
}
