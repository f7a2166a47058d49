//! Structural primitives shared by every tree variant.
//!
//! A [`RawTree`] is just the node arena plus the handle of the root. It knows how to search,
//! relink and rotate nodes while keeping parent and child links consistent, but it knows nothing
//! about balancing. Each variant wraps one and layers its own restructuring on top.

use std::cmp::Ordering;
use std::collections::VecDeque;

use log::trace;

use crate::arena::{Arena, NodeId};
use crate::error::InvariantError;
use crate::node::{BinaryNode, Dir, Links, NodeRef};
use crate::traverse::{Traversal, TraversalOrder};

/// Where a search for a value ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Search {
    /// A node holds the value.
    Found(NodeId),
    /// No node holds the value. If the tree is non-empty this names the last node visited and the
    /// empty child slot the value would occupy.
    Vacant(Option<(NodeId, Dir)>),
}

#[derive(Clone)]
pub(crate) struct RawTree<N> {
    pub(crate) arena: Arena<N>,
    pub(crate) root: Option<NodeId>,
}

impl<N> Default for RawTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> RawTree<N> {
    pub(crate) const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}

impl<N: BinaryNode> RawTree<N> {
    fn links(&self, id: NodeId) -> &Links {
        self.arena[id].links()
    }

    fn links_mut(&mut self, id: NodeId) -> &mut Links {
        self.arena[id].links_mut()
    }

    pub(crate) fn value(&self, id: NodeId) -> &N::Value {
        self.arena[id].value()
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).parent()
    }

    pub(crate) fn child(&self, id: NodeId, dir: Dir) -> Option<NodeId> {
        self.links(id).child(dir)
    }

    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).left()
    }

    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).right()
    }

    /// Which child slot of `parent` holds `child`.
    pub(crate) fn side(&self, parent: NodeId, child: NodeId) -> Dir {
        if self.left(parent) == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    /// Hangs `child` in the `dir` slot of `parent` and points the child back at it.
    pub(crate) fn attach(&mut self, parent: NodeId, dir: Dir, child: Option<NodeId>) {
        self.links_mut(parent).set_child(dir, child);
        if let Some(child) = child {
            self.links_mut(child).set_parent(Some(parent));
        }
    }

    /// Puts `new` where `old` currently hangs. If `old` has no parent it was the root, so `new`
    /// becomes the root. Every rotation and unlink reseats the root through here.
    ///
    /// `old` keeps its own links; the caller is responsible for them.
    pub(crate) fn reseat(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.parent(old);
        match parent {
            Some(parent) => {
                let dir = self.side(parent, old);
                self.links_mut(parent).set_child(dir, new);
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.links_mut(new).set_parent(parent);
        }
    }

    /// Makes `id` the root of the whole tree, cutting it loose from any former parent. Used when
    /// a subtree is split off and reassembled.
    pub(crate) fn make_root(&mut self, id: Option<NodeId>) {
        if let Some(id) = id {
            self.links_mut(id).set_parent(None);
        }
        self.root = id;
    }

    /// Rotates `node` down in direction `dir`, lifting its child on the opposite side into its
    /// place. Returns the lifted child.
    ///
    /// ## Panics
    ///
    /// When `node` has no child opposite `dir`.
    ///
    /// # Diagram
    ///
    /// Rotating `node` to the right:
    ///
    /// ```text
    ///    Option<parent>          Option<parent>
    ///      /                       /
    ///    node                     up
    ///    /  \                    /  \
    ///  up    z     rotate ->    x   node
    ///  / \                          /  \
    /// x   y                        y    z
    /// ```
    pub(crate) fn rotate(&mut self, node: NodeId, dir: Dir) -> NodeId {
        let up = self
            .child(node, !dir)
            .expect("rotation requires a child to lift");
        let inner = self.child(up, dir);
        trace!("rotating {:?} {:?}, lifting {:?}", node, dir, up);

        self.reseat(node, Some(up));
        self.attach(node, !dir, inner);
        self.attach(up, dir, Some(node));

        up
    }

    /// The last node found by repeatedly following `dir` from `id`: the minimum of the subtree for
    /// `Dir::Left` and the maximum for `Dir::Right`.
    pub(crate) fn extreme(&self, mut id: NodeId, dir: Dir) -> NodeId {
        while let Some(next) = self.child(id, dir) {
            id = next;
        }
        id
    }

    /// The extreme node of the whole tree in direction `dir`.
    pub(crate) fn edge(&self, dir: Dir) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, dir))
    }

    /// The node holding the smallest value greater than `id`'s, or `None` if `id` holds the
    /// maximum.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.right(id) {
            return Some(self.extreme(right, Dir::Left));
        }

        let mut node = id;
        while let Some(parent) = self.parent(node) {
            if self.left(parent) == Some(node) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    pub(crate) fn search(&self, value: &N::Value) -> Search
    where
        N::Value: Ord,
    {
        let Some(mut current) = self.root else {
            return Search::Vacant(None);
        };

        loop {
            let dir = match value.cmp(self.value(current)) {
                Ordering::Less => Dir::Left,
                Ordering::Equal => return Search::Found(current),
                Ordering::Greater => Dir::Right,
            };
            match self.child(current, dir) {
                Some(next) => current = next,
                None => return Search::Vacant(Some((current, dir))),
            }
        }
    }

    pub(crate) fn find(&self, value: &N::Value) -> Option<NodeId>
    where
        N::Value: Ord,
    {
        match self.search(value) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// Allocates `node` and links it into the vacant slot a failed [`search`](Self::search)
    /// reported.
    pub(crate) fn link_leaf(&mut self, slot: Option<(NodeId, Dir)>, node: N) -> NodeId {
        let id = self.arena.alloc(node);
        match slot {
            Some((parent, dir)) => self.attach(parent, dir, Some(id)),
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(id);
            }
        }
        id
    }

    pub(crate) fn traversal(&self, order: TraversalOrder) -> Traversal<'_, N> {
        Traversal::new(self, order)
    }

    /// Feeds nodes to `visitor` in `order` until it returns `false`. Returns how many nodes were
    /// visited, including the one that stopped the walk.
    pub(crate) fn traverse<'a, F>(&'a self, order: TraversalOrder, mut visitor: F) -> usize
    where
        F: FnMut(NodeRef<'a, N>) -> bool,
    {
        let mut visited = 0;
        for node in self.traversal(order) {
            visited += 1;
            if !visitor(node) {
                break;
            }
        }
        visited
    }

    /// Asserts the ordering of `id` against its children when debug assertions are enabled.
    pub(crate) fn debug_assert_ordered(&self, id: NodeId)
    where
        N::Value: Ord,
    {
        if cfg!(debug_assertions) {
            if let Some(left) = self.left(id) {
                assert!(self.value(left) < self.value(id));
            }
            if let Some(right) = self.right(id) {
                assert!(self.value(right) > self.value(id));
            }
        }
    }

    /// Checks the invariants every variant shares: consistent parent links, a parentless root,
    /// strictly increasing in-order values and matching length bookkeeping.
    pub(crate) fn check_structure(&self) -> Result<(), InvariantError>
    where
        N::Value: Ord,
    {
        let Some(root) = self.root else {
            return match self.len() {
                0 => Ok(()),
                stored => Err(InvariantError::LengthMismatch {
                    stored,
                    reachable: 0,
                }),
            };
        };
        if self.parent(root).is_some() {
            return Err(InvariantError::RootHasParent(root));
        }

        // Walk child links only, so a broken parent link is reported rather than followed.
        let mut reachable = 0;
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            reachable += 1;
            if reachable > self.len() {
                break;
            }
            for child in [self.left(id), self.right(id)].into_iter().flatten() {
                if self.parent(child) != Some(id) {
                    return Err(InvariantError::BrokenParentLink { parent: id, child });
                }
                queue.push_back(child);
            }
        }
        if reachable != self.len() {
            return Err(InvariantError::LengthMismatch {
                stored: self.len(),
                reachable,
            });
        }

        let mut previous: Option<&N::Value> = None;
        for node in self.traversal(TraversalOrder::InOrder) {
            if previous.map_or(false, |previous| previous >= node.value()) {
                return Err(InvariantError::OutOfOrder(node.id()));
            }
            previous = Some(node.value());
        }

        Ok(())
    }
}
