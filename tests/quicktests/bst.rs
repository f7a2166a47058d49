use std::collections::HashSet;

use canopy::bst::Tree;
use canopy::SearchTree;

use crate::{agrees_with_set, expected, in_order, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    agrees_with_set(&ops, &mut tree) && tree.check_invariants().is_ok()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    xs.iter().all(|x| tree.find(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.find(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    in_order(&tree) == expected(&xs, &deletes) && tree.check_invariants().is_ok()
}

#[quickcheck]
fn successor_is_next_in_order(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let sorted = in_order(&tree);

    sorted
        .iter()
        .enumerate()
        .all(|(i, x)| tree.successor(x) == sorted.get(i + 1))
}

#[quickcheck]
fn insert_all_counts_new_values(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let unique: HashSet<_> = xs.iter().copied().collect();

    tree.insert_all(xs) == unique.len() && tree.len() == unique.len()
}
