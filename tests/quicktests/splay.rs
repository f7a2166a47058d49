use canopy::splay::Tree;
use canopy::TraversalOrder;

use crate::{agrees_with_set, expected, in_order, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    agrees_with_set(&ops, &mut tree) && tree.check_invariants().is_ok()
}

#[quickcheck]
fn found_value_is_visited_first(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    xs.iter().all(|x| {
        tree.find(x) && tree.traverse(TraversalOrder::PreOrder, |node| node.value() != x) == 1
    })
}

#[quickcheck]
fn inserted_value_is_root(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    xs.into_iter().all(|x| {
        tree.insert(x);
        tree.root() == Some(&x)
    })
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    in_order(&tree) == expected(&xs, &deletes) && tree.check_invariants().is_ok()
}

#[test]
fn find_after_many_inserts() {
    let mut tree: Tree<_> = [4, 5, 6, 2, 1, 20, 17, 22, 18].into_iter().collect();

    assert!(tree.find(&1));
    assert!(tree.find(&17));

    let calls = tree.traverse(TraversalOrder::PreOrder, |node| *node.value() != 17);
    assert_eq!(calls, 1);
}
