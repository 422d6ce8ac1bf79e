//! Balanced construction. Values are sorted and deduplicated, then the middle value becomes the
//! root and each half is built the same way on either side of it. No rotations are needed
//! afterwards: a tree built from `n` values has a depth of `⌈lg(n + 1)⌉`.

use crate::node::{Node, Subtree};

/// Builds a balanced subtree from values in any order. Returns the subtree and how many distinct
/// values ended up in it.
pub(crate) fn balanced<T, I>(values: I) -> (Subtree<T>, usize)
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut values: Vec<T> = values.into_iter().collect();
    values.sort_unstable();
    values.dedup();

    let len = values.len();
    (from_sorted(&mut values.into_iter(), len), len)
}

/// Builds a subtree out of the next `count` values of an ascending iterator. The value at index
/// `count / 2` becomes the root.
fn from_sorted<T, I>(values: &mut I, count: usize) -> Subtree<T>
where
    I: Iterator<Item = T>,
{
    if count == 0 {
        return Subtree::Leaf;
    }

    let middle = count / 2;
    let left = from_sorted(values, middle);
    let Some(value) = values.next() else {
        return left;
    };
    let right = from_sorted(values, count - middle - 1);

    let mut node = Node::new(value);
    node.set_left(left);
    node.set_right(right);
    Subtree::Node(Box::new(node))
}

/// Tears a subtree down, returning its values in ascending order.
pub(crate) fn drain_sorted<T>(root: Subtree<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut pending: Vec<(T, Subtree<T>)> = Vec::new();
    let mut current = root;

    loop {
        while let Subtree::Node(node) = current {
            let (value, left, right) = node.into_parts();
            pending.push((value, right));
            current = left;
        }

        let Some((value, right)) = pending.pop() else {
            break;
        };
        values.push(value);
        current = right;
    }

    values
}
