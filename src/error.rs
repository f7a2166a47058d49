use thiserror::Error;

use crate::arena::NodeId;

/// A structural or coloring invariant that a tree failed to uphold. Returned by the
/// `check_invariants` method of each tree.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    /// An in-order walk produced two values that were not strictly increasing.
    #[error("in-order walk is not strictly increasing at node {0:?}")]
    OutOfOrder(NodeId),
    /// A child's parent link does not point back at the node holding it.
    #[error("node {child:?} does not link back to its parent {parent:?}")]
    BrokenParentLink {
        /// The node whose child slot holds `child`.
        parent: NodeId,
        /// The child with the wrong back-link.
        child: NodeId,
    },
    /// The root has a parent link.
    #[error("root node {0:?} has a parent")]
    RootHasParent(NodeId),
    /// The number of reachable nodes disagrees with the stored length.
    #[error("tree stores {stored} nodes but {reachable} are reachable from the root")]
    LengthMismatch {
        /// The length the tree reports.
        stored: usize,
        /// The number of nodes reachable from the root.
        reachable: usize,
    },
    /// The root of a red-black tree is red.
    #[error("root node {0:?} is red")]
    RedRoot(NodeId),
    /// A red node has a red child.
    #[error("red node {0:?} has a red child")]
    RedChildOfRed(NodeId),
    /// Two paths below a node pass through different numbers of black nodes.
    #[error("black-height below node {node:?} is {left} on the left but {right} on the right")]
    BlackHeightMismatch {
        /// The node whose subtrees disagree.
        node: NodeId,
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
}

/// The text parsed as a [`TraversalOrder`](crate::TraversalOrder) names no traversal order.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown traversal order `{0}`")]
pub struct ParseTraversalOrderError(pub(crate) String);
