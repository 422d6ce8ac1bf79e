//! A mutable BST whose empty positions are explicit sentinel [`Leaf`][Subtree::Leaf]s.
//!
//! The tree never balances itself. Inserting already sorted values produces a chain, which
//! [`Tree::is_balanced`] will report and [`Tree::rebalance`] will fix by rebuilding the whole
//! tree from its sorted values.
//!
//! # Examples
//!
//! ```
//! use sentinel_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for x in 1..=5 {
//!     tree.insert(x);
//! }
//!
//! // Sorted inserts make a chain leaning to the right.
//! assert_eq!(tree.height(), 4);
//! assert_eq!(tree.is_balanced(), Ok(false));
//!
//! tree.rebalance();
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.is_balanced(), Ok(true));
//!
//! // Deleting returns the value that was removed.
//! assert_eq!(tree.delete(&3), Some(3));
//! assert_eq!(tree.delete(&3), None);
//! assert_eq!(tree.inorder(), vec![&1, &2, &4, &5]);
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument, trace, Level};

use crate::build;
use crate::error::{TreeError, TreeResult};
use crate::node::{Node, Side, Subtree};
use crate::traversal::{self, Iter, Order, Strategy};

/// A Binary Search Tree of values. This can be used for inserting, finding, and deleting values
/// and for walking them in any of the four classic [`Order`]s.
#[derive(Clone)]
pub struct Tree<T> {
    root: Subtree<T>,
    len: usize,
    strategy: Strategy,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        // Dropping a `Box` chain recursively can blow the stack on a badly skewed tree.
        let mut pending = vec![self.root.take()];
        while let Some(subtree) = pending.pop() {
            if let Subtree::Node(node) = subtree {
                let (_, left, right) = node.into_parts();
                pending.push(left);
                pending.push(right);
            }
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Subtree::Leaf,
            len: 0,
            strategy: Strategy::default(),
        }
    }

    /// Use the given [`Strategy`] for every traversal of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_bst::{Strategy, Tree};
    ///
    /// let tree = Tree::build([2, 1, 3]).with_strategy(Strategy::Recursive);
    /// assert_eq!(tree.preorder(), vec![&2, &1, &3]);
    /// ```
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The [`Strategy`] traversals of this tree use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// How many values are in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// The node at the top of the tree, if there is one.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.node()
    }

    /// How many levels of nodes the tree has. This is 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// The number of edges on the longest path from the root down to a node. A single node has
    /// a height of 0 and an empty tree a height of -1.
    pub fn height(&self) -> isize {
        self.depth() as isize - 1
    }

    /// Whether the root's two subtrees differ in depth by at most one. Only the root is
    /// checked; deeper nodes may still be lopsided.
    ///
    /// # Errors
    ///
    /// [`TreeError::PreconditionViolated`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_bst::{Tree, TreeError};
    ///
    /// assert_eq!(Tree::build([5, 3, 8, 1, 4, 7, 9]).is_balanced(), Ok(true));
    /// assert!(matches!(
    ///     Tree::<i32>::new().is_balanced(),
    ///     Err(TreeError::PreconditionViolated(_))
    /// ));
    /// ```
    pub fn is_balanced(&self) -> TreeResult<bool> {
        let root = self.root().ok_or(TreeError::PreconditionViolated(
            "an empty tree has no subtrees to compare",
        ))?;

        Ok(root.left().depth().abs_diff(root.right().depth()) <= 1)
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        self.root.extreme(Side::Left).map(Node::value)
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        self.root.extreme(Side::Right).map(Node::value)
    }

    /// Walks the tree in `order`, calling `visit` on every node along the way. Returns the
    /// values in the order they were visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_bst::{Order, Tree};
    ///
    /// let tree = Tree::build([1, 2, 3, 4, 5, 6, 7]);
    ///
    /// let mut leaves = Vec::new();
    /// let values = tree.traverse(Order::LevelOrder, |node| {
    ///     if node.left().is_leaf() && node.right().is_leaf() {
    ///         leaves.push(*node.value());
    ///     }
    /// });
    ///
    /// assert_eq!(values, vec![&4, &2, &6, &1, &3, &5, &7]);
    /// assert_eq!(leaves, vec![1, 3, 5, 7]);
    /// ```
    pub fn traverse<F>(&self, order: Order, visit: F) -> Vec<&T>
    where
        F: FnMut(&Node<T>),
    {
        traversal::walk(&self.root, order, self.strategy, visit)
    }

    /// The values of the tree in ascending order.
    pub fn inorder(&self) -> Vec<&T> {
        self.traverse(Order::Inorder, |_| {})
    }

    /// Like [`Tree::inorder`], calling `visit` on each node.
    pub fn inorder_with<F: FnMut(&Node<T>)>(&self, visit: F) -> Vec<&T> {
        self.traverse(Order::Inorder, visit)
    }

    /// The values of the tree with every node before its subtrees.
    pub fn preorder(&self) -> Vec<&T> {
        self.traverse(Order::Preorder, |_| {})
    }

    /// Like [`Tree::preorder`], calling `visit` on each node.
    pub fn preorder_with<F: FnMut(&Node<T>)>(&self, visit: F) -> Vec<&T> {
        self.traverse(Order::Preorder, visit)
    }

    /// The values of the tree with every node after its subtrees.
    pub fn postorder(&self) -> Vec<&T> {
        self.traverse(Order::Postorder, |_| {})
    }

    /// Like [`Tree::postorder`], calling `visit` on each node.
    pub fn postorder_with<F: FnMut(&Node<T>)>(&self, visit: F) -> Vec<&T> {
        self.traverse(Order::Postorder, visit)
    }

    /// The values of the tree level by level, top to bottom and left to right.
    pub fn level_order(&self) -> Vec<&T> {
        self.traverse(Order::LevelOrder, |_| {})
    }

    /// Like [`Tree::level_order`], calling `visit` on each node.
    pub fn level_order_with<F: FnMut(&Node<T>)>(&self, visit: F) -> Vec<&T> {
        self.traverse(Order::LevelOrder, visit)
    }

    /// A lazy iterator over the values of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }
}

impl<T: Ord> Tree<T> {
    /// Builds a balanced tree out of `values`. Duplicates are dropped and the order of `values`
    /// doesn't matter.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_bst::Tree;
    ///
    /// let tree = Tree::build([5, 3, 8, 1, 4, 7, 9, 5]);
    ///
    /// assert_eq!(tree.len(), 7);
    /// assert_eq!(tree.inorder(), vec![&1, &3, &4, &5, &7, &8, &9]);
    /// assert_eq!(tree.root().map(|n| *n.value()), Some(5));
    /// ```
    pub fn build<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let (root, len) = build::balanced(values);
        debug!(len, depth = root.depth(), "built balanced tree");

        Self {
            root,
            len,
            strategy: Strategy::default(),
        }
    }

    /// Potentially finds the node holding `value`. If there isn't one, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_bst::Tree;
    ///
    /// let tree = Tree::build([1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&2).map(|n| *n.value()), Some(2));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        self.root.find(value)
    }

    /// Whether some node holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Puts `value` into the first empty position found by searching for it and returns the new
    /// node. The tree is not rebalanced.
    ///
    /// Duplicates aren't rejected: an equal value is placed to the right of the existing one.
    /// Callers relying on unique values shouldn't insert one that's already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let node = tree.insert(1);
    ///
    /// assert_eq!(node.value(), &1);
    /// assert!(node.left().is_leaf() && node.right().is_leaf());
    /// ```
    pub fn insert(&mut self, value: T) -> &Node<T> {
        self.len += 1;
        trace!(len = self.len, "inserting value");

        self.root.vacant_slot_mut(&value).materialize(value)
    }

    /// Removes the node holding `value` and returns its value. If no node holds `value` the tree
    /// is left untouched and `None` is returned.
    ///
    /// When the node has two real children it takes the value of its predecessor if its left
    /// subtree is deeper and of its successor otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_bst::Tree;
    ///
    /// let mut tree = Tree::build([5, 3, 8, 1, 4, 7, 9]);
    ///
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.delete(&42), None);
    /// assert_eq!(tree.inorder(), vec![&1, &3, &4, &7, &8, &9]);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let removed = self.root.slot_mut(value).and_then(Subtree::remove);
        if removed.is_some() {
            self.len -= 1;
        }
        trace!(found = removed.is_some(), len = self.len, "deleted value");

        removed
    }

    /// Rebuilds the tree from its sorted values so that it is as shallow as possible.
    #[instrument(level = "debug", skip(self), fields(len = self.len))]
    pub fn rebalance(&mut self) {
        // `depth` walks every node.
        let before = tracing::enabled!(Level::DEBUG).then(|| self.depth());
        let (root, len) = build::balanced(build::drain_sorted(self.root.take()));
        self.root = root;
        self.len = len;

        if let Some(before) = before {
            debug!(before, after = self.depth(), "rebalanced tree");
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<T: Ord> From<Vec<T>> for Tree<T> {
    fn from(values: Vec<T>) -> Self {
        Self::build(values)
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    /// Inserts each value one at a time. Nothing is rebalanced.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Consumes the tree, yielding its values in ascending order.
    fn into_iter(mut self) -> Self::IntoIter {
        self.len = 0;
        build::drain_sorted(self.root.take()).into_iter()
    }
}

/// Parses a list like `[5, 3, 8]`, `5,3,8` or `5 3 8` into a balanced tree.
///
/// # Examples
///
/// ```
/// use sentinel_bst::{Tree, TreeError};
///
/// let tree: Tree<i32> = "[5, 3, 8]".parse().unwrap();
/// assert_eq!(tree.inorder(), vec![&3, &5, &8]);
///
/// let bad = "[5, three]".parse::<Tree<i32>>();
/// assert!(matches!(bad, Err(TreeError::InvalidInput { .. })));
/// ```
impl<T> FromStr for Tree<T>
where
    T: Ord + FromStr,
    T::Err: fmt::Display,
{
    type Err = TreeError;

    fn from_str(s: &str) -> TreeResult<Self> {
        let trimmed = s.trim();
        let list = match trimmed.strip_prefix('[') {
            Some(rest) => rest.strip_suffix(']').ok_or_else(|| TreeError::InvalidInput {
                input: s.to_string(),
                reason: "unclosed `[`".to_string(),
            })?,
            None if trimmed.ends_with(']') => {
                return Err(TreeError::InvalidInput {
                    input: s.to_string(),
                    reason: "unopened `]`".to_string(),
                })
            }
            None => trimmed,
        };

        list.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse().map_err(|e: T::Err| TreeError::InvalidInput {
                    input: token.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<TreeResult<Vec<T>>>()
            .map(Self::build)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test::logging::init_test_setup;

    fn example() -> Tree<i32> {
        Tree::build([5, 3, 8, 1, 4, 7, 9])
    }

    /// Asserts that an inorder walk of the tree is strictly ascending.
    fn assert_ordered(tree: &Tree<i32>) {
        let values = tree.inorder();
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{values:?}");
        assert_eq!(values.len(), tree.len());
    }

    #[test]
    fn example_scenario() {
        let mut tree = example();
        assert_eq!(tree.inorder(), vec![&1, &3, &4, &5, &7, &8, &9]);
        assert_eq!(tree.find(&4).map(Node::value), Some(&4));
        assert_eq!(tree.is_balanced(), Ok(true));

        assert_eq!(tree.delete(&1), Some(1));
        assert!(tree.find(&1).is_none());
        assert_ordered(&tree);
    }

    #[test]
    fn empty_tree() {
        let tree = Tree::<i32>::build([]);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.inorder().is_empty());
        assert!(tree.find(&1).is_none());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.min(), None);
        assert_eq!(
            tree.is_balanced(),
            Err(TreeError::PreconditionViolated(
                "an empty tree has no subtrees to compare"
            ))
        );
    }

    #[test]
    fn sorted_inserts_make_a_chain() {
        init_test_setup();
        let mut tree = Tree::new();
        for x in 1..=5 {
            tree.insert(x);
        }

        assert_eq!(tree.height(), 4);
        assert_eq!(tree.is_balanced(), Ok(false));

        tree.rebalance();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.is_balanced(), Ok(true));
        assert_eq!(tree.len(), 5);
        assert_ordered(&tree);
    }

    #[test]
    fn rebalance_is_idempotent() {
        let mut tree = Tree::new();
        tree.extend([9, 2, 7, 1, 8, 3, 6, 4, 5]);

        tree.rebalance();
        let first_values: Vec<i32> = tree.iter().copied().collect();
        let first_height = tree.height();
        tree.rebalance();

        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), first_values);
        assert_eq!(tree.height(), first_height);
    }

    #[test]
    fn rebalance_drops_duplicates() {
        let mut tree = Tree::new();
        tree.extend([2, 1, 2, 3]);
        assert_eq!(tree.len(), 4);

        tree.rebalance();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.inorder(), vec![&1, &2, &3]);
    }

    #[test]
    fn insert_returns_new_node() {
        let mut tree = example();
        let node = tree.insert(6);

        assert_eq!(node.value(), &6);
        assert!(node.left().is_leaf());
        assert!(node.right().is_leaf());
        assert_eq!(tree.find(&6).map(Node::value), Some(&6));
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn insert_into_empty_tree_becomes_root() {
        let mut tree = Tree::new();
        tree.insert(10);

        assert_eq!(tree.root().map(Node::value), Some(&10));
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.is_balanced(), Ok(true));
    }

    #[test]
    fn duplicates_go_right() {
        let mut tree = Tree::new();
        tree.insert(1);
        tree.insert(1);

        let root = tree.root().expect("Two values");
        assert!(root.left().is_leaf());
        assert_eq!(root.right().node().map(Node::value), Some(&1));
    }

    #[test]
    fn delete_with_no_children() {
        let mut tree = example();
        assert_eq!(tree.delete(&9), Some(9));

        let eight = tree.find(&8).expect("8 stays");
        assert!(eight.right().is_leaf());
        assert_ordered(&tree);
    }

    #[test]
    fn delete_with_leaf_left() {
        let mut tree = example();
        tree.delete(&7);
        assert_eq!(tree.delete(&8), Some(8));

        assert_eq!(tree.root().map(|n| n.right().node().map(Node::value)), Some(Some(&9)));
        assert_ordered(&tree);
    }

    #[test]
    fn delete_with_leaf_right() {
        let mut tree = example();
        tree.delete(&9);
        assert_eq!(tree.delete(&8), Some(8));

        assert_eq!(tree.root().map(|n| n.right().node().map(Node::value)), Some(Some(&7)));
        assert_ordered(&tree);
    }

    #[test]
    fn delete_root_with_equal_subtrees_uses_successor() {
        let mut tree = example();
        assert_eq!(tree.delete(&5), Some(5));

        assert_eq!(tree.root().map(Node::value), Some(&7));
        assert_eq!(tree.preorder(), vec![&7, &3, &1, &4, &8, &9]);
    }

    #[test]
    fn delete_root_with_taller_left_uses_predecessor() {
        let mut tree = example();
        tree.insert(2);
        assert_eq!(tree.delete(&5), Some(5));

        assert_eq!(tree.root().map(Node::value), Some(&4));
        assert_eq!(tree.preorder(), vec![&4, &3, &1, &2, &8, &7, &9]);
    }

    #[test]
    fn delete_keeps_predecessors_left_child() {
        // 10's predecessor is 6, which has a left child of its own that must survive.
        let mut tree = Tree::new();
        tree.extend([10, 4, 12, 2, 6, 5]);
        assert_eq!(tree.delete(&10), Some(10));

        assert_eq!(tree.preorder(), vec![&6, &4, &2, &5, &12]);
        assert_ordered(&tree);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut tree = example();
        assert_eq!(tree.delete(&6), None);
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.preorder(), example().preorder());

        let mut empty = Tree::<i32>::new();
        assert_eq!(empty.delete(&6), None);
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn delete_everything() {
        let mut tree = example();
        for x in [5, 1, 9, 3, 8, 4, 7] {
            assert_eq!(tree.delete(&x), Some(x));
            assert_ordered(&tree);
        }

        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn min_and_max() {
        let tree = example();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&9));
    }

    #[test]
    fn owned_iteration_is_sorted() {
        let tree: Tree<_> = vec![3, 1, 2].into();
        assert_eq!(tree.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);

        let tree: Tree<_> = (0..10).rev().collect();
        assert_eq!((&tree).into_iter().count(), 10);
    }

    #[rstest]
    #[case("[5, 3, 8]", vec![3, 5, 8])]
    #[case("5,3,8", vec![3, 5, 8])]
    #[case("  5 3\t8 3 ", vec![3, 5, 8])]
    #[case("[]", vec![])]
    #[case("", vec![])]
    fn parse(#[case] input: &str, #[case] expected: Vec<i32>) {
        let tree: Tree<i32> = input.parse().expect("Valid input");
        assert_eq!(tree.into_iter().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    #[case("[5, 3", "[5, 3")]
    #[case("5, 3]", "5, 3]")]
    #[case("[5, x, 8]", "x")]
    #[case("1.5", "1.5")]
    fn parse_invalid(#[case] input: &str, #[case] offending: &str) {
        match input.parse::<Tree<i32>>() {
            Err(TreeError::InvalidInput { input, .. }) => assert_eq!(input, offending),
            other => panic!("Expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn strategy_is_kept() {
        let tree = example().with_strategy(Strategy::Recursive);
        assert_eq!(tree.strategy(), Strategy::Recursive);
        assert_eq!(Tree::<i32>::new().strategy(), Strategy::Iterative);
    }

    #[rstest]
    #[case::inorder(Order::Inorder, [1, 3, 4, 5, 7, 8, 9])]
    #[case::preorder(Order::Preorder, [5, 3, 1, 4, 8, 7, 9])]
    #[case::postorder(Order::Postorder, [1, 4, 3, 7, 9, 8, 5])]
    #[case::level_order(Order::LevelOrder, [5, 3, 8, 1, 4, 7, 9])]
    fn visiting_wrappers(#[case] order: Order, #[case] expected: [i32; 7]) {
        let tree = example();
        let mut seen = Vec::new();
        let visit = |node: &Node<i32>| seen.push(*node.value());

        let values = match order {
            Order::Inorder => tree.inorder_with(visit),
            Order::Preorder => tree.preorder_with(visit),
            Order::Postorder => tree.postorder_with(visit),
            Order::LevelOrder => tree.level_order_with(visit),
        };

        assert_eq!(seen, expected);
        assert!(values.into_iter().eq(expected.iter()));
    }

    /// A chain leaning right, built directly rather than by `n` quadratic inserts.
    fn long_chain(n: i32) -> Tree<i32> {
        let mut root = Subtree::Leaf;
        for value in (0..n).rev() {
            let mut node = Node::new(value);
            node.set_right(root);
            root = Subtree::Node(Box::new(node));
        }

        Tree {
            root,
            len: n as usize,
            strategy: Strategy::default(),
        }
    }

    #[test]
    fn clone_deep_chain() {
        let tree = long_chain(200_000);
        let copy = tree.clone();

        assert_eq!(copy.len(), 200_000);
        assert_eq!(copy.depth(), 200_000);
        assert!(copy.iter().eq(tree.iter()));
    }

    #[test]
    fn debug_deep_chain() {
        let tree = long_chain(200_000);
        let shown = format!("{tree:?}");

        assert!(shown.starts_with("Tree { len: 200000, strategy: Iterative, values: [0, 1, 2, "));
        assert!(shown.ends_with("199998, 199999] }"));
    }
}
