use crate::arena::NodeId;
use crate::node::BinaryNode;
use crate::raw::RawTree;

/// The occupied child slots of a node, which decide how it is unlinked during deletion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Children {
    /// A leaf. It can simply be detached from its parent.
    None,
    /// Exactly one child, which takes the node's place.
    One(NodeId),
    /// Both children. The node's in-order neighbour has to stand in for it.
    Both {
        /// The left child.
        left: NodeId,
        /// The right child.
        right: NodeId,
    },
}

impl Children {
    pub(crate) fn of<N: BinaryNode>(tree: &RawTree<N>, id: NodeId) -> Self {
        match (tree.left(id), tree.right(id)) {
            (None, None) => Children::None,
            (Some(child), None) | (None, Some(child)) => Children::One(child),
            (Some(left), Some(right)) => Children::Both { left, right },
        }
    }
}
