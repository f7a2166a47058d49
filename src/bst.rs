//! A plain Binary Search Tree. Values go where the comparisons send them and nothing is ever
//! rebalanced, so inserting sorted input builds a tree that is really a linked list. It is the
//! baseline the other trees in this crate improve on.
//!
//! # Examples
//!
//! ```
//! use canopy::bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.find(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.find(&1));
//!
//! // Inserting the same value again is a no-op.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! assert!(tree.delete(&1));
//! assert!(!tree.find(&1));
//! assert!(!tree.delete(&1));
//! ```

use std::fmt;

use log::trace;

use crate::error::InvariantError;
use crate::node::{BinaryNode, Dir, Links, NodeRef};
use crate::raw::{RawTree, Search};
use crate::traverse::{Traversal, TraversalOrder};
use crate::util::Children;
use crate::SearchTree;

/// A node of an unbalanced tree: a value and its links, nothing else.
#[derive(Clone, Debug)]
pub struct Node<E> {
    value: E,
    links: Links,
}

impl<E> Node<E> {
    fn new(value: E) -> Self {
        Self {
            value,
            links: Links::default(),
        }
    }
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

/// An unbalanced Binary Search Tree holding a set of distinct values.
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

    /// Returns a lazy iterator over the nodes of the tree in the given order.
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
}

impl<E: Ord> Tree<E> {
    /// Inserts `value` into the tree. Returns `false`, leaving the tree untouched, if the value
    /// was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// ```
    pub fn insert(&mut self, value: E) -> bool {
        match self.raw.search(&value) {
            Search::Found(_) => false,
            Search::Vacant(slot) => {
                let id = self.raw.link_leaf(slot, Node::new(value));
                if let Some(parent) = self.raw.parent(id) {
                    self.raw.debug_assert_ordered(parent);
                }
                true
            }
        }
    }

    /// Whether `value` is in the tree.
    pub fn find(&self, value: &E) -> bool {
        self.raw.find(value).is_some()
    }

    /// Deletes `value` from the tree. Returns `false` if it wasn't there.
    ///
    /// A node with two children is not unlinked itself: it takes the value of its in-order
    /// successor and the successor's node is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy::bst::Tree;
    /// use canopy::TraversalOrder;
    ///
    /// let mut tree: Tree<_> = [3, 0, 1, 2, 6, 4, 5].into_iter().collect();
    ///
    /// assert!(tree.delete(&6));
    /// assert_eq!(tree.values(TraversalOrder::PreOrder), [&3, &0, &1, &2, &4, &5]);
    /// ```
    pub fn delete(&mut self, value: &E) -> bool {
        let Some(id) = self.raw.find(value) else {
            return false;
        };

        let removed = match Children::of(&self.raw, id) {
            Children::None => {
                trace!("deleting leaf {:?}", id);
                self.raw.reseat(id, None);
                id
            }
            Children::One(child) => {
                trace!("deleting {:?}, promoting its only child {:?}", id, child);
                self.raw.reseat(id, Some(child));
                id
            }
            Children::Both { right, .. } => {
                // The successor is the minimum of the right subtree so it has no left child.
                let successor = self.raw.extreme(right, Dir::Left);
                trace!("deleting {:?} by unlinking its successor {:?}", id, successor);
                let orphan = self.raw.right(successor);
                self.raw.reseat(successor, orphan);
                successor
            }
        };

        let Node { value: moved, .. } = self.raw.arena.free(removed);
        if removed != id {
            self.raw.arena[id].value = moved;
            self.raw.debug_assert_ordered(id);
        }
        true
    }

    /// The smallest value in the tree greater than `value`. Returns `None` if `value` is not in
    /// the tree or is its maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy::bst::Tree;
    ///
    /// let tree: Tree<_> = [20, 8, 22, 4, 12, 10, 14].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&10), Some(&12));
    /// assert_eq!(tree.successor(&14), Some(&20));
    /// assert_eq!(tree.successor(&22), None);
    /// assert_eq!(tree.successor(&13), None);
    /// ```
    pub fn successor(&self, value: &E) -> Option<&E> {
        let id = self.raw.find(value)?;
        self.raw.successor(id).map(|id| self.raw.value(id))
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&E> {
        self.edge(Dir::Left)
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&E> {
        self.edge(Dir::Right)
    }

    fn edge(&self, dir: Dir) -> Option<&E> {
        self.raw.edge(dir).map(|id| self.raw.value(id))
    }

    /// Verifies the ordering and link invariants of the tree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.raw.check_structure()
    }

    #[cfg(test)]
    fn root(&self) -> Option<crate::arena::NodeId> {
        self.raw.root
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

#[cfg(test)]
mod tests {
    use super::*;

    fn pre_order(tree: &Tree<i32>) -> Vec<i32> {
        tree.values(TraversalOrder::PreOrder)
            .into_iter()
            .copied()
            .collect()
    }

    #[test]
    fn always_adding_left() {
        let values = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut inserted = Vec::new();

        let mut tree = Tree::new();
        assert!(!tree.find(&10));

        for value in values {
            assert!(tree.insert(value));
            inserted.push(value);
            for inserted in &inserted {
                assert!(tree.find(inserted));
            }
        }
        assert_eq!(pre_order(&tree), values);
    }

    #[test]
    fn always_adding_right() {
        let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut inserted = Vec::new();

        let mut tree = Tree::new();
        assert!(!tree.find(&1));

        for value in values {
            assert!(tree.insert(value));
            inserted.push(value);
            for inserted in &inserted {
                assert!(tree.find(inserted));
            }
        }
        assert_eq!(pre_order(&tree), values);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut tree: Tree<_> = [5, 3, 7].into_iter().collect();

        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 3);
        assert_eq!(pre_order(&tree), [5, 3, 7]);
    }

    #[test]
    fn in_order_successor() {
        let tree: Tree<_> = [20, 8, 22, 4, 12, 10, 14].into_iter().collect();

        for (value, successor) in [(10, 12), (14, 20), (8, 10), (4, 8), (20, 22)] {
            assert_eq!(tree.successor(&value), Some(&successor));
        }
        assert_eq!(tree.successor(&22), None);
    }

    #[test]
    fn delete_leaf() {
        let mut tree: Tree<_> = [1, 0, 2].into_iter().collect();

        assert!(tree.delete(&2));
        assert_eq!(pre_order(&tree), [1, 0]);
    }

    #[test]
    fn delete_with_one_child() {
        let mut tree: Tree<_> = [3, 0, 1, 2, 6, 4, 5].into_iter().collect();

        assert!(tree.delete(&6));
        assert_eq!(pre_order(&tree), [3, 0, 1, 2, 4, 5]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn delete_root_with_two_children() {
        let mut tree: Tree<_> = [20, 8, 22, 4, 12, 10, 14].into_iter().collect();

        assert!(tree.delete(&20));
        assert_eq!(pre_order(&tree), [22, 8, 4, 12, 10, 14]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn delete_with_successor_that_has_a_right_child() {
        let mut tree: Tree<_> = [5, 3, 9, 6, 8, 7].into_iter().collect();

        assert!(tree.delete(&5));
        assert_eq!(pre_order(&tree), [6, 3, 9, 8, 7]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn delete_with_successor_deeper_in_right_subtree() {
        let mut tree: Tree<_> = [8, 3, 12, 10, 14, 9, 11].into_iter().collect();

        assert!(tree.delete(&8));
        assert_eq!(pre_order(&tree), [9, 3, 12, 10, 11, 14]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn delete_root() {
        let mut tree = Tree::new();
        tree.insert(5);

        assert!(tree.delete(&5));
        assert!(!tree.find(&5));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn delete_root_with_one_child() {
        let mut tree: Tree<_> = [5, 3, 1].into_iter().collect();

        assert!(tree.delete(&5));
        assert_eq!(pre_order(&tree), [3, 1]);
        let root = tree.root().unwrap();
        assert_eq!(tree.raw.parent(root), None);
    }

    #[test]
    fn delete_missing_value_changes_nothing() {
        let mut tree: Tree<_> = [5, 3, 7].into_iter().collect();

        assert!(!tree.delete(&4));
        assert_eq!(pre_order(&tree), [5, 3, 7]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn min_and_max() {
        let mut tree: Tree<_> = [5, 3, 7, 1, 9].into_iter().collect();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&9));

        tree.clear();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn clone_is_independent() {
        let mut tree: Tree<_> = [5, 3, 7].into_iter().collect();
        let copy = tree.clone();

        tree.delete(&3);
        assert!(copy.find(&3));
        copy.check_invariants().unwrap();
    }

    #[test]
    fn debug_lists_values_in_order() {
        let tree: Tree<_> = [2, 1, 3].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1, 2, 3}");
    }
}
