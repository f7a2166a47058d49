use canopy::red_black::{Color, Tree};
use canopy::{BinaryNode, NodeRef, TraversalOrder};

use crate::{agrees_with_set, expected, in_order, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    agrees_with_set(&ops, &mut tree) && tree.check_invariants().is_ok()
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
        if tree.check_invariants().is_err() {
            return false;
        }
    }

    in_order(&tree) == expected(&xs, &deletes)
}

#[quickcheck]
fn root_is_black(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    tree.iter(TraversalOrder::PreOrder)
        .next()
        .map_or(true, |root| root.color() == Color::Black)
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let height = tree
        .iter(TraversalOrder::InOrder)
        .filter(|node| node.is_leaf())
        .map(depth)
        .max()
        .unwrap_or(0);

    // A red-black tree with n nodes is at most 2 * lg(n + 1) tall.
    height as f64 <= 2.0 * ((tree.len() + 1) as f64).log2()
}

fn depth<N: BinaryNode>(mut node: NodeRef<'_, N>) -> usize {
    let mut depth = 1;
    while let Some(parent) = node.parent() {
        node = parent;
        depth += 1;
    }
    depth
}
