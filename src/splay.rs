//! A Splay Tree. Whenever a value is inserted or looked up, the node holding it (or, for a
//! missing value, the last node the search touched) is rotated all the way up to the root. There is
//! no balance invariant at all, yet any sequence of operations costs `O(lg N)` amortized per
//! operation, and values that are touched often stay near the top.
//!
//! Because lookups restructure the tree, [`Tree::find`] takes `&mut self`.
//!
//! # Examples
//!
//! ```
//! use canopy::splay::Tree;
//!
//! let mut tree: Tree<_> = [4, 5, 6, 2, 1, 20, 17, 22, 18].into_iter().collect();
//!
//! assert!(tree.find(&17));
//! assert_eq!(tree.root(), Some(&17));
//!
//! // A miss still splays the closest node the search reached.
//! assert!(!tree.find(&19));
//! assert_eq!(tree.root(), Some(&20));
//! ```

use std::fmt;

use log::trace;

use crate::arena::NodeId;
use crate::error::InvariantError;
use crate::node::{BinaryNode, Dir, Links, NodeRef};
use crate::raw::{RawTree, Search};
use crate::traverse::{Traversal, TraversalOrder};
use crate::SearchTree;

/// A node of a splay tree.
#[derive(Clone, Debug)]
pub struct Node<E> {
    value: E,
    links: Links,
}

impl<E> BinaryNode for Node<E> {
    type Value = E;

    fn value(&self) -> &E {
        &self.value
    }

    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

/// A self-adjusting Binary Search Tree holding a set of distinct values.
#[derive(Clone)]
pub struct Tree<E> {
    raw: RawTree<Node<E>>,
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for Tree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter(TraversalOrder::InOrder).map(|node| node.value()))
            .finish()
    }
}

impl<E> Tree<E> {
    /// Generate a new, empty `Tree`.
    pub const fn new() -> Self {
        Self {
            raw: RawTree::new(),
        }
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.raw.root.is_none()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// The value at the root: the one most recently inserted, found, or closest to a failed
    /// lookup.
    pub fn root(&self) -> Option<&E> {
        self.raw.root.map(|root| self.raw.value(root))
    }

    /// Returns a lazy iterator over the nodes of the tree in the given order. Walking the tree
    /// does not splay.
    pub fn iter(&self, order: TraversalOrder) -> Traversal<'_, Node<E>> {
        self.raw.traversal(order)
    }

    /// Calls `visitor` on each node in the given order until it returns `false`. Returns the
    /// number of nodes visited.
    pub fn traverse<'a, F>(&'a self, order: TraversalOrder, visitor: F) -> usize
    where
        F: FnMut(NodeRef<'a, Node<E>>) -> bool,
    {
        self.raw.traverse(order, visitor)
    }

    /// The values of the tree in the given order.
    pub fn values(&self, order: TraversalOrder) -> Vec<&E> {
        self.iter(order).map(|node| node.value()).collect()
    }

    /// Rotates `node` up until it is the root.
    fn splay(&mut self, node: NodeId) {
        while let Some(parent) = self.raw.parent(node) {
            let side = self.raw.side(parent, node);
            match self.raw.parent(parent) {
                None => {
                    trace!("zig {:?} over {:?}", node, parent);
                    self.raw.rotate(parent, !side);
                }
                Some(grandparent) if self.raw.side(grandparent, parent) == side => {
                    self.zig_zig(node, parent, grandparent, side);
                }
                Some(grandparent) => {
                    self.zig_zag(node, parent, grandparent, !side);
                }
            }
        }
        debug_assert_eq!(self.raw.root, Some(node));
    }

    /// Lifts `node` two levels when it and `parent` are both `dir` children.
    ///
    /// # Diagram
    ///
    /// With `dir` being `Dir::Left`:
    ///
    /// ```text
    ///          gp               n
    ///         /  \             / \
    ///        p    d           a   p
    ///       / \     zig-zig ->   / \
    ///      n   c                b   gp
    ///     / \                      /  \
    ///    a   b                    c    d
    /// ```
    fn zig_zig(&mut self, node: NodeId, parent: NodeId, grandparent: NodeId, dir: Dir) {
        trace!("zig-zig {:?} over {:?} and {:?}", node, parent, grandparent);
        let b = self.raw.child(node, !dir);
        let c = self.raw.child(parent, !dir);

        self.raw.reseat(grandparent, Some(node));
        self.raw.attach(node, !dir, Some(parent));
        self.raw.attach(parent, dir, b);
        self.raw.attach(parent, !dir, Some(grandparent));
        self.raw.attach(grandparent, dir, c);
    }

    /// Lifts `node` two levels when `parent` is a `dir` child but `node` is on the other side,
    /// leaving `parent` and `grandparent` as its two children.
    ///
    /// # Diagram
    ///
    /// With `dir` being `Dir::Left`:
    ///
    /// ```text
    ///          gp                  n
    ///         /  \               /   \
    ///        p    d             p     gp
    ///       / \     zig-zag -> / \   /  \
    ///      a   n              a   b c    d
    ///         / \
    ///        b   c
    /// ```
    fn zig_zag(&mut self, node: NodeId, parent: NodeId, grandparent: NodeId, dir: Dir) {
        trace!("zig-zag {:?} over {:?} and {:?}", node, parent, grandparent);
        let b = self.raw.child(node, dir);
        let c = self.raw.child(node, !dir);

        self.raw.reseat(grandparent, Some(node));
        self.raw.attach(node, dir, Some(parent));
        self.raw.attach(node, !dir, Some(grandparent));
        self.raw.attach(parent, !dir, b);
        self.raw.attach(grandparent, dir, c);
    }
}

impl<E: Ord> Tree<E> {
    /// Inserts `value` into the tree and splays it to the root. If the value was already present
    /// nothing is inserted, the existing node is still splayed, and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy::splay::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.root(), Some(&2));
    ///
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.root(), Some(&1));
    /// ```
    pub fn insert(&mut self, value: E) -> bool {
        match self.raw.search(&value) {
            Search::Found(id) => {
                self.splay(id);
                false
            }
            Search::Vacant(slot) => {
                let node = Node {
                    value,
                    links: Links::default(),
                };
                let id = self.raw.link_leaf(slot, node);
                self.splay(id);
                self.raw.debug_assert_ordered(id);
                true
            }
        }
    }

    /// Whether `value` is in the tree. The node holding it, or the last node visited while
    /// looking for it, is splayed to the root either way.
    pub fn find(&mut self, value: &E) -> bool {
        match self.raw.search(value) {
            Search::Found(id) => {
                self.splay(id);
                true
            }
            Search::Vacant(Some((last, _))) => {
                self.splay(last);
                false
            }
            Search::Vacant(None) => false,
        }
    }

    /// Deletes `value` from the tree. Returns `false` if it wasn't there, in which case the tree
    /// is still splayed around the closest value.
    ///
    /// The node is splayed to the root and removed, which splits the tree in two. The largest
    /// value of the left half is splayed to the top of that half, where it has no right child,
    /// and the right half is hung there.
    pub fn delete(&mut self, value: &E) -> bool {
        if !self.find(value) {
            return false;
        }
        let Some(root) = self.raw.root else {
            return false;
        };

        let left = self.raw.left(root);
        let right = self.raw.right(root);
        self.raw.arena.free(root);

        match left {
            Some(left) => {
                self.raw.make_root(Some(left));
                let max = self.raw.extreme(left, Dir::Right);
                self.splay(max);
                self.raw.attach(max, Dir::Right, right);
                self.raw.debug_assert_ordered(max);
            }
            None => self.raw.make_root(right),
        }
        true
    }

    /// Verifies the ordering and link invariants of the tree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.raw.check_structure()
    }
}

impl<E: Ord> SearchTree<E> for Tree<E> {
    type Node = Node<E>;

    fn insert(&mut self, value: E) -> bool {
        Tree::insert(self, value)
    }

    fn delete(&mut self, value: &E) -> bool {
        Tree::delete(self, value)
    }

    fn find(&mut self, value: &E) -> bool {
        Tree::find(self, value)
    }

    fn traverse<'a, F>(&'a self, order: TraversalOrder, visitor: F) -> usize
    where
        F: FnMut(NodeRef<'a, Node<E>>) -> bool,
    {
        Tree::traverse(self, order, visitor)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }
}

impl<E: Ord> FromIterator<E> for Tree<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<E: Ord> Extend<E> for Tree<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
