use sentinel_bst::{Strategy, Tree};

use std::collections::BTreeSet;

use crate::Op;

/// Applies a set of operations to a tree, never inserting a value twice.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>) {
    for op in ops {
        match op {
            Op::Insert(x) => {
                if !tree.contains(x) {
                    tree.insert(*x);
                }
            }
            Op::Remove(x) => {
                tree.delete(x);
            }
        }
    }
}

fn strictly_ascending(tree: &Tree<i8>) -> bool {
    tree.inorder().windows(2).all(|w| w[0] < w[1])
}

/// The smallest depth a tree with `n` nodes can have, i.e. `⌈lg(n + 1)⌉`.
fn minimum_depth(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

quickcheck::quickcheck! {
    fn build_sorts_and_deduplicates(xs: Vec<i8>) -> bool {
        let tree = Tree::build(xs.clone());
        let expected: BTreeSet<_> = xs.into_iter().collect();

        tree.inorder().into_iter().eq(expected.iter()) && tree.len() == expected.len()
    }

    fn build_is_as_shallow_as_possible(xs: Vec<i8>) -> bool {
        let tree = Tree::build(xs);
        tree.depth() <= minimum_depth(tree.len())
            && tree.is_balanced().unwrap_or(true)
    }

    fn stays_ordered(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::build(xs);
        do_ops(&ops, &mut tree);

        strictly_ascending(&tree) && tree.inorder().len() == tree.len()
    }

    fn insert_then_find(xs: Vec<i8>, x: i8) -> bool {
        let mut tree = Tree::build(xs);
        if tree.contains(&x) {
            return true;
        }

        tree.insert(x);
        tree.find(&x).map(|node| *node.value()) == Some(x)
    }

    fn delete_then_find(xs: Vec<i8>, x: i8) -> bool {
        let mut tree = Tree::build(xs);
        let was_present = tree.contains(&x);
        let before = tree.preorder().into_iter().copied().collect::<Vec<_>>();

        let removed = tree.delete(&x);
        let untouched = tree.preorder().into_iter().copied().collect::<Vec<_>>() == before;

        tree.find(&x).is_none()
            && removed.is_some() == was_present
            && (was_present || untouched)
    }

    fn traversals_visit_the_same_values(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::build(xs);
        do_ops(&ops, &mut tree);

        let inorder: BTreeSet<_> = tree.inorder().into_iter().collect();
        let all_match = [tree.preorder(), tree.postorder(), tree.level_order()]
            .into_iter()
            .all(|values| {
                values.len() == inorder.len()
                    && values.into_iter().collect::<BTreeSet<_>>() == inorder
            });
        all_match
    }

    fn strategies_agree(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::build(xs);
        do_ops(&ops, &mut tree);
        let recursive = tree.clone().with_strategy(Strategy::Recursive);

        tree.inorder() == recursive.inorder()
            && tree.preorder() == recursive.preorder()
            && tree.postorder() == recursive.postorder()
            && tree.level_order() == recursive.level_order()
    }

    fn rebalance_is_idempotent(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::build(xs);
        do_ops(&ops, &mut tree);

        tree.rebalance();
        let once = (tree.inorder().into_iter().copied().collect::<Vec<_>>(), tree.height());
        tree.rebalance();
        let twice = (tree.inorder().into_iter().copied().collect::<Vec<_>>(), tree.height());

        once == twice && tree.depth() <= minimum_depth(tree.len())
    }
}
