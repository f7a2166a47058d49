//! Slot storage for the nodes of a single tree.
//!
//! Every tree owns exactly one [`Arena`]. Nodes refer to each other by [`NodeId`] so a child can
//! point back at its parent without the parent being co-owned. Removed slots are recycled by later
//! insertions.

use std::fmt;

/// An opaque handle to a node inside one tree. Handles are only meaningful for the tree that
/// produced them and may be reused after the node they named is deleted.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone)]
pub(crate) struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<usize>,
    len: usize,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Arena<N> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn alloc(&mut self, node: N) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                debug_assert!(self.slots[index].is_none());
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Releases the slot for `id` and hands back the node that lived there.
    ///
    /// ## Panics
    ///
    /// When `id` does not name a live node.
    pub(crate) fn free(&mut self, id: NodeId) -> N {
        let node = self.slots[id.0].take().expect("freeing a dead node");
        self.free.push(id.0);
        self.len -= 1;
        node
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<N> std::ops::Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        self.slots[id.0].as_ref().expect("dangling node id")
    }
}

impl<N> std::ops::IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        self.slots[id.0].as_mut().expect("dangling node id")
    }
}
