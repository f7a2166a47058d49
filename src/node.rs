//! The link structure shared by every node type in this crate.
//!
//! Each tree variant has its own concrete node (the red-black node carries a color, the others
//! don't) but all of them embed a [`Links`] so the structural code in [`crate::raw`] and the
//! traversals in [`crate::traverse`] can treat them alike.

use std::fmt;
use std::ops::Not;

use crate::arena::{Arena, NodeId};

/// Which child slot of a node we are talking about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Parent and child handles of a node. Only the arena owns nodes; these are plain lookups.
#[derive(Clone, Debug, Default)]
pub struct Links {
    parent: Option<NodeId>,
    children: [Option<NodeId>; 2],
}

impl Links {
    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn child(&self, dir: Dir) -> Option<NodeId> {
        self.children[dir as usize]
    }

    pub(crate) fn set_child(&mut self, dir: Dir, child: Option<NodeId>) {
        self.children[dir as usize] = child;
    }

    pub(crate) fn left(&self) -> Option<NodeId> {
        self.child(Dir::Left)
    }

    pub(crate) fn right(&self) -> Option<NodeId> {
        self.child(Dir::Right)
    }
}

/// Behavior common to the node types of every tree in this crate: a stored value plus the links
/// to its neighbours.
pub trait BinaryNode {
    /// The ordered element stored in the node.
    type Value;

    /// The element stored in this node.
    fn value(&self) -> &Self::Value;

    #[doc(hidden)]
    fn links(&self) -> &Links;

    #[doc(hidden)]
    fn links_mut(&mut self) -> &mut Links;
}

/// A read-only view of one node of a tree, handed to traversal visitors.
///
/// From a `NodeRef` you can walk to the node's parent and children, which makes it possible to
/// inspect the shape of a tree and not just its contents.
pub struct NodeRef<'a, N> {
    arena: &'a Arena<N>,
    id: NodeId,
}

impl<N> Clone for NodeRef<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<N> Copy for NodeRef<'_, N> {}

impl<'a, N: BinaryNode> NodeRef<'a, N> {
    pub(crate) fn new(arena: &'a Arena<N>, id: NodeId) -> Self {
        Self { arena, id }
    }

    pub(crate) fn node(&self) -> &'a N {
        let arena: &'a Arena<N> = self.arena;
        &arena[self.id]
    }

    /// The handle of this node within its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The element stored in this node.
    pub fn value(&self) -> &'a N::Value {
        self.node().value()
    }

    /// The node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.follow(self.node().links().parent())
    }

    /// The node's left child, holding smaller elements.
    pub fn left(&self) -> Option<Self> {
        self.follow(self.node().links().left())
    }

    /// The node's right child, holding larger elements.
    pub fn right(&self) -> Option<Self> {
        self.follow(self.node().links().right())
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        let links = self.node().links();
        links.left().is_none() && links.right().is_none()
    }

    fn follow(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.arena, id))
    }
}

impl<N> fmt::Debug for NodeRef<'_, N>
where
    N: BinaryNode,
    N::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .finish()
    }
}
