//! A Red-Black Tree. Every node is colored red or black and the tree maintains:
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from a node down to a missing child passes through the same number of black
//!    nodes (the node's black-height).
//!
//! Missing children count as black. Together these keep the longest root-to-leaf path at most twice
//! the shortest, so the height stays `O(lg N)`. Insertion and deletion both finish with a fixup
//! pass that recolors and rotates until the rules hold again.
//!
//! # Examples
//!
//! ```
//! use canopy::red_black::{Color, Tree};
//! use canopy::TraversalOrder;
//!
//! let mut tree = Tree::new();
//! tree.insert(32);
//! tree.insert(42);
//! tree.insert(52);
//!
//! // Inserting in sorted order still gives a balanced tree.
//! let shape: Vec<_> = tree
//!     .iter(TraversalOrder::BreadthFirst)
//!     .map(|node| (*node.value(), node.color()))
//!     .collect();
//! assert_eq!(shape, [(42, Color::Black), (32, Color::Red), (52, Color::Red)]);
//!
//! assert!(tree.delete(&42));
//! assert!(tree.check_invariants().is_ok());
//! ```

use std::collections::HashMap;
use std::fmt;

use log::trace;

use crate::arena::NodeId;
use crate::error::InvariantError;
use crate::node::{BinaryNode, Dir, Links, NodeRef};
use crate::raw::{RawTree, Search};
use crate::traverse::{Traversal, TraversalOrder};
use crate::util::Children;
use crate::SearchTree;

/// The color of a red-black node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node.
    Red,
    /// A black node. Missing children are black too.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// A node of a red-black tree.
#[derive(Clone, Debug)]
pub struct Node<E> {
    value: E,
    color: Color,
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

impl<E> NodeRef<'_, Node<E>> {
    /// The color of this node.
    pub fn color(&self) -> Color {
        self.node().color
    }
}

/// A self-balancing Binary Search Tree holding a set of distinct values.
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

    /// The number of black nodes on every path from the root down to a missing child.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut node = self.raw.root;
        while let Some(id) = node {
            if self.color(node) == Color::Black {
                height += 1;
            }
            node = self.raw.left(id);
        }
        height
    }

    /// Missing nodes are black.
    fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.raw.arena[id].color)
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.raw.arena[id].color = color;
    }
}

impl<E: Ord> Tree<E> {
    /// Inserts `value` into the tree. Returns `false`, leaving the tree untouched, if the value
    /// was already present.
    pub fn insert(&mut self, value: E) -> bool {
        match self.raw.search(&value) {
            Search::Found(_) => false,
            Search::Vacant(slot) => {
                let node = Node {
                    value,
                    color: Color::Red,
                    links: Links::default(),
                };
                let id = self.raw.link_leaf(slot, node);
                self.insert_fixup(id);
                self.raw.debug_assert_ordered(id);
                true
            }
        }
    }

    /// Restores the coloring rules after `node` was linked in as a red leaf. The only rule that
    /// can be broken is a red node with a red parent, and it is pushed up the tree until it can
    /// be resolved by a rotation.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(mut parent) = self.raw.parent(node) {
            if self.color(Some(parent)) == Color::Black {
                break;
            }
            // A red parent is never the root.
            let Some(grandparent) = self.raw.parent(parent) else {
                break;
            };
            let side = self.raw.side(grandparent, parent);
            let uncle = self.raw.child(grandparent, !side);

            if let (Some(uncle), Color::Red) = (uncle, self.color(uncle)) {
                trace!("red uncle {:?}: recoloring around {:?}", uncle, grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if self.raw.child(parent, !side) == Some(node) {
                trace!("triangle at {:?}: rotating {:?} {:?}", node, parent, side);
                self.raw.rotate(parent, side);
                std::mem::swap(&mut node, &mut parent);
            }

            trace!("line at {:?}: rotating {:?} {:?}", node, grandparent, !side);
            self.raw.rotate(grandparent, !side);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            break;
        }

        if let Some(root) = self.raw.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Whether `value` is in the tree.
    pub fn find(&self, value: &E) -> bool {
        self.raw.find(value).is_some()
    }

    /// Deletes `value` from the tree, rebalancing so that every coloring rule still holds.
    /// Returns `false` if the value wasn't there.
    pub fn delete(&mut self, value: &E) -> bool {
        let Some(id) = self.raw.find(value) else {
            return false;
        };

        // `fix` is whatever now sits where a node was unlinked (possibly nothing) and `fix_parent`
        // is its parent. If the unlinked node was black, that position is one black short.
        let (unlinked_color, fix, fix_parent) = match Children::of(&self.raw, id) {
            Children::None => {
                let parent = self.raw.parent(id);
                self.raw.reseat(id, None);
                (self.color(Some(id)), None, parent)
            }
            Children::One(child) => {
                let parent = self.raw.parent(id);
                self.raw.reseat(id, Some(child));
                (self.color(Some(id)), Some(child), parent)
            }
            Children::Both { left, right } => {
                // The successor moves into `id`'s place and takes its color, so the black node
                // that really disappears is the one at the successor's old position.
                let successor = self.raw.extreme(right, Dir::Left);
                let successor_color = self.color(Some(successor));
                let fix = self.raw.right(successor);
                let fix_parent = if successor == right {
                    Some(successor)
                } else {
                    let parent = self.raw.parent(successor);
                    self.raw.reseat(successor, fix);
                    self.raw.attach(successor, Dir::Right, Some(right));
                    parent
                };
                self.raw.reseat(id, Some(successor));
                self.raw.attach(successor, Dir::Left, Some(left));
                let color = self.color(Some(id));
                self.set_color(successor, color);
                (successor_color, fix, fix_parent)
            }
        };
        self.raw.arena.free(id);

        if unlinked_color == Color::Black {
            self.delete_fixup(fix, fix_parent);
        }
        true
    }

    /// Restores the black-height after a black node was unlinked above `node`. `node` carries an
    /// extra black until a recoloring or rotation can absorb it.
    fn delete_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.raw.root && self.color(node) == Color::Black {
            let Some(above) = parent else {
                break;
            };
            let side = if self.raw.left(above) == node {
                Dir::Left
            } else {
                Dir::Right
            };
            let mut sibling = self
                .raw
                .child(above, !side)
                .expect("a node short of a black has a sibling");

            if self.color(Some(sibling)) == Color::Red {
                trace!("red sibling {:?}: rotating {:?} {:?}", sibling, above, side);
                self.set_color(sibling, Color::Black);
                self.set_color(above, Color::Red);
                self.raw.rotate(above, side);
                sibling = self
                    .raw
                    .child(above, !side)
                    .expect("a node short of a black has a sibling");
            }

            let near = self.raw.child(sibling, side);
            let far = self.raw.child(sibling, !side);
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!("black nephews: recoloring {:?} and moving up", sibling);
                self.set_color(sibling, Color::Red);
                node = Some(above);
                parent = self.raw.parent(above);
                continue;
            }

            if self.color(far) == Color::Black {
                trace!("red near nephew: rotating {:?} {:?}", sibling, !side);
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                sibling = self.raw.rotate(sibling, !side);
            }

            trace!("red far nephew: rotating {:?} {:?}", above, side);
            let color = self.color(Some(above));
            self.set_color(sibling, color);
            self.set_color(above, Color::Black);
            if let Some(far) = self.raw.child(sibling, !side) {
                self.set_color(far, Color::Black);
            }
            self.raw.rotate(above, side);
            node = self.raw.root;
            break;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&E> {
        self.raw.edge(Dir::Left).map(|id| self.raw.value(id))
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&E> {
        self.raw.edge(Dir::Right).map(|id| self.raw.value(id))
    }

    /// Verifies the ordering, link and coloring invariants of the tree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.raw.check_structure()?;

        let Some(root) = self.raw.root else {
            return Ok(());
        };
        if self.color(Some(root)) == Color::Red {
            return Err(InvariantError::RedRoot(root));
        }

        // Children come before their parent in post-order, so their black-heights are ready.
        let mut heights: HashMap<NodeId, usize> = HashMap::new();
        for node in self.raw.traversal(TraversalOrder::PostOrder) {
            let id = node.id();
            let mut below = |child: Option<NodeId>| {
                child.map_or(0, |child| heights.remove(&child).unwrap_or(0))
            };
            let left = below(node.left().map(|child| child.id()));
            let right = below(node.right().map(|child| child.id()));

            if node.color() == Color::Red
                && [node.left(), node.right()]
                    .iter()
                    .flatten()
                    .any(|child| child.color() == Color::Red)
            {
                return Err(InvariantError::RedChildOfRed(id));
            }
            if left != right {
                return Err(InvariantError::BlackHeightMismatch {
                    node: id,
                    left,
                    right,
                });
            }
            heights.insert(id, left + usize::from(node.color() == Color::Black));
        }

        Ok(())
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
