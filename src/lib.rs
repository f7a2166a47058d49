//! This crate exposes three flavors of Binary Search Trees (BSTs) holding sets of ordered values,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). With clever construction the
//! height of a BST can be limited to `O(lg N)` where `N` is the number of nodes
//! in the tree. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! ## The trees
//!
//! - [`bst::Tree`] does no rebalancing at all. Sorted input degrades it into a linked list.
//! - [`red_black::Tree`] colors each node red or black and rotates on insert and delete so that
//!   no path from the root is more than twice as long as any other.
//! - [`splay::Tree`] moves every value it touches to the root. It has no balance invariant but
//!   keeps recently used values cheap to reach.
//!
//! All three store their nodes in an arena and link them with [`NodeId`] handles, parents
//! included, so every traversal runs without recursion or an explicit stack. They share the
//! [`SearchTree`] trait.
//!
//! ```
//! use canopy::{red_black, SearchTree, TraversalOrder};
//!
//! let mut tree = red_black::Tree::new();
//! assert_eq!(tree.insert_all([32, 42, 52]), 3);
//!
//! let mut visited = Vec::new();
//! tree.traverse(TraversalOrder::PreOrder, |node| {
//!     visited.push((*node.value(), node.color()));
//!     true
//! });
//! assert_eq!(
//!     visited,
//!     [
//!         (42, red_black::Color::Black),
//!         (32, red_black::Color::Red),
//!         (52, red_black::Color::Red),
//!     ]
//! );
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod error;
mod node;
mod raw;
mod util;

pub mod bst;
pub mod red_black;
pub mod splay;
pub mod traverse;


pub use arena::NodeId;
pub use error::{InvariantError, ParseTraversalOrderError};
pub use node::{BinaryNode, NodeRef};
pub use traverse::{Traversal, TraversalOrder};

/// The operations every tree in this crate supports.
///
/// `find` takes `&mut self` because a [`splay::Tree`] restructures itself on every lookup. The
/// other trees also offer a `find(&self)` inherent method.
pub trait SearchTree<E: Ord> {
    /// The node type handed to traversal visitors.
    type Node: BinaryNode<Value = E>;

    /// Inserts `value`. Returns `false` if it was already present, in which case the tree keeps
    /// its original value.
    fn insert(&mut self, value: E) -> bool;

    /// Removes `value`. Returns `false` if it wasn't present.
    fn delete(&mut self, value: &E) -> bool;

    /// Whether `value` is present.
    fn find(&mut self, value: &E) -> bool;

    /// Calls `visitor` on each node in `order` until it returns `false`. Returns the number of
    /// nodes visited, including the one that stopped the walk.
    fn traverse<'a, F>(&'a self, order: TraversalOrder, visitor: F) -> usize
    where
        Self::Node: 'a,
        F: FnMut(NodeRef<'a, Self::Node>) -> bool;

    /// The number of values stored.
    fn len(&self) -> usize;

    /// Whether no values are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts every value, returning how many of them were new.
    fn insert_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = E>,
    {
        values
            .into_iter()
            .fold(0, |inserted, value| inserted + usize::from(self.insert(value)))
    }
}
