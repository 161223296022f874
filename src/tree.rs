use crate::definitions::N_TOKENS_ON_STACK;
use crate::operators::OperatorTable;
use crate::postfix::Postfix;
use crate::tokenizer::{MatchNumeral, Token};
use crate::{exerr, ErrorKind, ExResult};
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};

/// Position of a node in the arena of an [`ExprTree`](ExprTree).
pub type NodeIdx = usize;

/// Index of the child slot that holds the right operand.
pub const RIGHT: usize = 0;
/// Index of the child slot that holds the left operand.
pub const LEFT: usize = 1;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Node {
    value: Token,
    // operator nodes have exactly two children, leaves none
    children: Option<[NodeIdx; 2]>,
}

/// Binary expression tree. All nodes are owned by an arena inside the tree and refer to
/// their children by index, hence dropping the tree releases every node.
///
/// The child slots follow the layout of a tree that is read from the reversed postfix
/// sequence, i.e., slot [`RIGHT`](RIGHT)` == 0` holds the right operand and slot
/// [`LEFT`](LEFT)` == 1` the left one.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// let tree = rpnex::parse("8 - 3")?;
/// let root = tree.root();
/// assert!(root.has_children());
/// assert_eq!(root.value().as_str(), "-");
/// assert_eq!(root.child(0).unwrap().value().as_str(), "3");
/// assert_eq!(root.child(1).unwrap().value().as_str(), "8");
/// assert!(root.child(2).is_none());
/// assert_eq!(format!("{}", tree), "(8 - 3)");
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ExprTree {
    nodes: SmallVec<[Node; N_TOKENS_ON_STACK]>,
    root: NodeIdx,
}

impl ExprTree {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            idx: self.root,
        }
    }

    pub fn node(&self, idx: NodeIdx) -> Option<NodeRef<'_>> {
        if idx < self.nodes.len() {
            Some(NodeRef { tree: self, idx })
        } else {
            None
        }
    }

    /// Number of nodes of the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`, a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in post-order, i.e., children come before their parent and the root is
    /// the last node.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |idx| NodeRef { tree: self, idx })
    }

    /// Number of nodes on the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        let mut depths = SmallVec::<[usize; N_TOKENS_ON_STACK]>::with_capacity(self.len());
        for node in self.iter() {
            let depth = node
                .children()
                .map_or(0, |(left, right)| depths[left.idx()].max(depths[right.idx()]));
            depths.push(depth + 1);
        }
        depths.get(self.root).copied().unwrap_or(0)
    }

    /// Postfix sequence of the tree, i.e., the left operand, the right operand, and then
    /// the operator for every internal node.
    pub fn to_postfix(&self) -> Postfix {
        self.iter().map(|node| node.value().clone()).collect()
    }
}

enum DisplayItem<'a> {
    Node(NodeRef<'a>),
    Op(&'a Token),
    Close,
}

impl Display for ExprTree {
    /// Fully parenthesized infix representation, e.g., `((2 ^ 3) ^ 2)`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut stack = SmallVec::<[DisplayItem; N_TOKENS_ON_STACK]>::new();
        stack.push(DisplayItem::Node(self.root()));
        while let Some(item) = stack.pop() {
            match item {
                DisplayItem::Node(node) => match node.children() {
                    Some((left, right)) => {
                        write!(f, "(")?;
                        stack.push(DisplayItem::Close);
                        stack.push(DisplayItem::Node(right));
                        stack.push(DisplayItem::Op(node.value()));
                        stack.push(DisplayItem::Node(left));
                    }
                    None => write!(f, "{}", node.value())?,
                },
                DisplayItem::Op(value) => write!(f, " {} ", value)?,
                DisplayItem::Close => write!(f, ")")?,
            }
        }
        Ok(())
    }
}

/// Borrowed handle of a node that is used to walk through an [`ExprTree`](ExprTree).
#[derive(Copy, Clone, Debug)]
pub struct NodeRef<'a> {
    tree: &'a ExprTree,
    idx: NodeIdx,
}

impl<'a> NodeRef<'a> {
    pub fn idx(&self) -> NodeIdx {
        self.idx
    }

    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.idx]
    }

    /// Operator nodes have two children, leaves have none.
    pub fn has_children(&self) -> bool {
        self.node().children.is_some()
    }

    /// Returns the child in slot `i`, [`RIGHT`](RIGHT) or [`LEFT`](LEFT). Leaves and
    /// slots other than `0` and `1` yield `None`.
    pub fn child(&self, i: usize) -> Option<NodeRef<'a>> {
        let children = self.node().children?;
        children.get(i).map(|&idx| NodeRef {
            tree: self.tree,
            idx,
        })
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.child(LEFT)
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.child(RIGHT)
    }

    /// Left and right operand of an operator node.
    pub fn children(&self) -> Option<(NodeRef<'a>, NodeRef<'a>)> {
        Some((self.left()?, self.right()?))
    }

    /// Copy of the token the node has been created from.
    pub fn value(&self) -> &'a Token {
        &self.node().value
    }
}

/// Builds a binary tree from a postfix sequence with a node stack. Numerals and other
/// non-operators become leaves, each operator takes the two topmost nodes as children.
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind
/// [`MalformedExpression`](ErrorKind::MalformedExpression) is returned if
///
/// * an operator does not find two operands,
/// * the sequence contains a parenthesis,
/// * the sequence is empty, or
/// * more than one operand remains at the end.
///
pub fn build<T: Copy, NM: MatchNumeral>(
    postfix: &Postfix,
    ops: &OperatorTable<T>,
) -> ExResult<ExprTree> {
    let mut nodes = SmallVec::<[Node; N_TOKENS_ON_STACK]>::new();
    let mut stack = SmallVec::<[NodeIdx; N_TOKENS_ON_STACK]>::new();

    for (i, token) in postfix.iter().enumerate() {
        let children = if NM::is_numeral(token.as_str()) {
            None
        } else {
            match ops.lookup(token.as_str()) {
                Some(op) if op.is_paren() => {
                    return Err(exerr!(
                        ErrorKind::MalformedExpression,
                        "parenthesis at position {} of a postfix sequence",
                        i
                    ));
                }
                Some(op) => {
                    let mut pop = || {
                        stack.pop().ok_or_else(|| {
                            exerr!(
                                ErrorKind::MalformedExpression,
                                "operator {} at position {} lacks an operand",
                                op.repr(),
                                i
                            )
                        })
                    };
                    let right = pop()?;
                    let left = pop()?;
                    let mut children = [0; 2];
                    children[RIGHT] = right;
                    children[LEFT] = left;
                    Some(children)
                }
                None => None,
            }
        };
        // nodes are stored in postfix order, children always precede their parent
        stack.push(nodes.len());
        nodes.push(Node {
            value: token.clone(),
            children,
        });
    }

    match stack.as_slice() {
        [root] => Ok(ExprTree { root: *root, nodes }),
        [] => Err(exerr!(
            ErrorKind::MalformedExpression,
            "cannot build a tree from an empty expression"
        )),
        _ => Err(exerr!(
            ErrorKind::MalformedExpression,
            "{} operands are left without operator",
            stack.len()
        )),
    }
}
