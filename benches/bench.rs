use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use canopy::{bst, red_black, splay, SearchTree};

#[derive(Clone)]
enum TreeEnum<E> {
    Plain(bst::Tree<E>),
    RedBlack(red_black::Tree<E>),
    Splay(splay::Tree<E>),
}

impl<E: Ord> TreeEnum<E> {
    fn find(&mut self, value: &E) -> bool {
        match self {
            Self::Plain(t) => t.find(value),
            Self::RedBlack(t) => t.find(value),
            Self::Splay(t) => t.find(value),
        }
    }

    fn insert(&mut self, value: E) {
        match self {
            Self::Plain(t) => {
                t.insert(value);
            }
            Self::RedBlack(t) => {
                t.insert(value);
            }
            Self::Splay(t) => {
                t.insert(value);
            }
        }
    }

    fn delete(&mut self, value: &E) {
        match self {
            Self::Plain(t) => {
                t.delete(value);
            }
            Self::RedBlack(t) => {
                t.delete(value);
            }
            Self::Splay(t) => {
                t.delete(value);
            }
        }
    }
}

/// Builds a tree holding `0..num_nodes` inserted in an order that leaves an unbalanced tree
/// perfectly balanced, so the plain BST isn't benchmarked as a linked list.
fn balanced<T: SearchTree<i32> + Default>(num_levels: u32) -> T {
    let mut tree = T::default();
    for level in 0..num_levels {
        let step = 2i32.pow(num_levels - level);
        let first = step / 2 - 1;
        tree.insert_all((first..).step_by(step as usize).take(2usize.pow(level)));
    }
    tree
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// implementations of BSTs before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let plain: bst::Tree<i32> = balanced(num_levels);
        let largest_element_in_tree = *plain.max().unwrap();

        let tree_tests = [
            ("bst", TreeEnum::Plain(plain)),
            ("red-black", TreeEnum::RedBlack(balanced(num_levels))),
            ("splay", TreeEnum::Splay(balanced(num_levels))),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// Sorted input is the worst case for the plain BST and the best case for showing off the
/// balanced trees.
fn bench_ascending(c: &mut Criterion) {
    let mut group = c.benchmark_group("ascending-inserts");

    for num_nodes in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("bst", num_nodes), &num_nodes, |b, &n| {
            b.iter(|| black_box((0..n).collect::<bst::Tree<i32>>()))
        });
        group.bench_with_input(
            BenchmarkId::new("red-black", num_nodes),
            &num_nodes,
            |b, &n| b.iter(|| black_box((0..n).collect::<red_black::Tree<i32>>())),
        );
        group.bench_with_input(BenchmarkId::new("splay", num_nodes), &num_nodes, |b, &n| {
            b.iter(|| black_box((0..n).collect::<splay::Tree<i32>>()))
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _found = black_box(tree.find(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        tree.delete(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _found = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        tree.delete(&(i + 1));
    });

    bench_ascending(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
