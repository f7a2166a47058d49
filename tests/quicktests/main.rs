//! Property tests driving every tree through the public API only.

#[macro_use]
extern crate quickcheck_macros;

mod bst;
mod red_black;
mod splay;

use std::collections::BTreeSet;

use canopy::{SearchTree, TraversalOrder};
use quickcheck::{Arbitrary, Gen};

/// Something to do to a tree and, in parallel, to a `BTreeSet` that acts as the model.
#[derive(Copy, Clone, Debug)]
pub enum Op<E> {
    Insert(E),
    Delete(E),
    Find(E),
}

impl<E: Arbitrary> Arbitrary for Op<E> {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(E::arbitrary(g)),
            1 => Op::Delete(E::arbitrary(g)),
            _ => Op::Find(E::arbitrary(g)),
        }
    }
}

/// Applies `ops` to both `tree` and a fresh set. Returns `false` as soon as they disagree on the
/// outcome of an operation.
pub fn agrees_with_set<T: SearchTree<i8>>(ops: &[Op<i8>], tree: &mut T) -> bool {
    let mut set = BTreeSet::new();
    let agreed = ops.iter().all(|op| match *op {
        Op::Insert(v) => tree.insert(v) == set.insert(v),
        Op::Delete(v) => tree.delete(&v) == set.remove(&v),
        Op::Find(v) => tree.find(&v) == set.contains(&v),
    });

    agreed && tree.len() == set.len() && in_order(&*tree) == set.into_iter().collect::<Vec<_>>()
}

pub fn in_order<T: SearchTree<E>, E: Ord + Copy>(tree: &T) -> Vec<E> {
    let mut values = Vec::with_capacity(tree.len());
    tree.traverse(TraversalOrder::InOrder, |node| {
        values.push(*node.value());
        true
    });
    values
}

/// The set of values left after inserting `xs` and deleting `deletes`, sorted.
pub fn expected(xs: &[i8], deletes: &[i8]) -> Vec<i8> {
    let mut set: BTreeSet<_> = xs.iter().copied().collect();
    for delete in deletes {
        set.remove(delete);
    }
    set.into_iter().collect()
}
