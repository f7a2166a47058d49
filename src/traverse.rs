//! Walking every node of a tree in one of four orders.
//!
//! The depth-first orders don't keep a stack: they step from node to node by following the parent
//! and child links stored in the tree itself, so even a tree that has degenerated into a long
//! chain is walked in constant extra space. Breadth-first keeps a queue of the next level.
//!
//! # Examples
//!
//! ```
//! use canopy::bst::Tree;
//! use canopy::TraversalOrder;
//!
//! let tree: Tree<_> = [2, 1, 3].into_iter().collect();
//!
//! let mut seen = Vec::new();
//! tree.traverse(TraversalOrder::PostOrder, |node| {
//!     seen.push(*node.value());
//!     true
//! });
//! assert_eq!(seen, [1, 3, 2]);
//!
//! // Returning `false` from the visitor stops the walk.
//! let visited = tree.traverse(TraversalOrder::PreOrder, |node| *node.value() != 2);
//! assert_eq!(visited, 1);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::arena::NodeId;
use crate::error::ParseTraversalOrderError;
use crate::node::{BinaryNode, Dir, NodeRef};
use crate::raw::RawTree;

/// The order in which a traversal visits the nodes of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Each node before its left subtree, then its right subtree.
    PreOrder,
    /// The left subtree, then the node, then the right subtree. Visits values in sorted order.
    InOrder,
    /// The left subtree, then the right subtree, then the node.
    PostOrder,
    /// Level by level from the root, left to right within a level.
    BreadthFirst,
}

impl TraversalOrder {
    /// Every traversal order.
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::PreOrder,
        TraversalOrder::InOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::BreadthFirst,
    ];
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::PreOrder => "PreOrder",
            TraversalOrder::InOrder => "InOrder",
            TraversalOrder::PostOrder => "PostOrder",
            TraversalOrder::BreadthFirst => "BreadthFirst",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalOrder {
    type Err = ParseTraversalOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "preorder" | "pre-order" => Ok(TraversalOrder::PreOrder),
            "inorder" | "in-order" => Ok(TraversalOrder::InOrder),
            "postorder" | "post-order" => Ok(TraversalOrder::PostOrder),
            "breadthfirst" | "breadth-first" => Ok(TraversalOrder::BreadthFirst),
            _ => Err(ParseTraversalOrderError(s.to_owned())),
        }
    }
}

enum Cursor {
    PreOrder(Option<NodeId>),
    InOrder(Option<NodeId>),
    PostOrder(Option<NodeId>),
    BreadthFirst(VecDeque<NodeId>),
}

/// A lazy, single pass walk over the nodes of a tree. Created by the `iter` method of each tree.
pub struct Traversal<'a, N> {
    tree: &'a RawTree<N>,
    cursor: Cursor,
}

impl<'a, N: BinaryNode> Traversal<'a, N> {
    pub(crate) fn new(tree: &'a RawTree<N>, order: TraversalOrder) -> Self {
        let root = tree.root;
        let cursor = match order {
            TraversalOrder::PreOrder => Cursor::PreOrder(root),
            TraversalOrder::InOrder => {
                Cursor::InOrder(root.map(|root| tree.extreme(root, Dir::Left)))
            }
            TraversalOrder::PostOrder => Cursor::PostOrder(root.map(|root| deepest(tree, root))),
            TraversalOrder::BreadthFirst => Cursor::BreadthFirst(root.into_iter().collect()),
        };
        Self { tree, cursor }
    }
}

impl<'a, N: BinaryNode> Iterator for Traversal<'a, N> {
    type Item = NodeRef<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let id = match &mut self.cursor {
            Cursor::PreOrder(next) => {
                let id = (*next)?;
                *next = pre_order_next(tree, id);
                id
            }
            Cursor::InOrder(next) => {
                let id = (*next)?;
                *next = tree.successor(id);
                id
            }
            Cursor::PostOrder(next) => {
                let id = (*next)?;
                *next = post_order_next(tree, id);
                id
            }
            Cursor::BreadthFirst(queue) => {
                let id = queue.pop_front()?;
                queue.extend(tree.left(id));
                queue.extend(tree.right(id));
                id
            }
        };
        Some(NodeRef::new(&tree.arena, id))
    }
}

impl<N: BinaryNode> FusedIterator for Traversal<'_, N> {}

/// The first node visited by a post-order walk of the subtree at `id`: keep descending, preferring
/// left, until reaching a leaf.
fn deepest<N: BinaryNode>(tree: &RawTree<N>, mut id: NodeId) -> NodeId {
    while let Some(next) = tree.left(id).or_else(|| tree.right(id)) {
        id = next;
    }
    id
}

fn pre_order_next<N: BinaryNode>(tree: &RawTree<N>, id: NodeId) -> Option<NodeId> {
    if let Some(child) = tree.left(id).or_else(|| tree.right(id)) {
        return Some(child);
    }

    // Climb until we leave a left subtree whose parent still has a right subtree to visit.
    let mut node = id;
    while let Some(parent) = tree.parent(node) {
        if tree.left(parent) == Some(node) {
            if let Some(right) = tree.right(parent) {
                return Some(right);
            }
        }
        node = parent;
    }
    None
}

fn post_order_next<N: BinaryNode>(tree: &RawTree<N>, id: NodeId) -> Option<NodeId> {
    let parent = tree.parent(id)?;
    match tree.right(parent) {
        Some(right) if tree.left(parent) == Some(id) => Some(deepest(tree, right)),
        _ => Some(parent),
    }
}
