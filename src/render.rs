//! Human readable renderings of trees and nodes. These are for looking at, not for storing:
//! nothing here can be parsed back into a tree.

use std::fmt;

use crate::node::{Node, Subtree};
use crate::Tree;

/// Shown in place of a child that is a sentinel.
const LEAF: &str = "<leaf>";

/// One line per node in preorder, indented by one space per level.
///
/// ```
/// use sentinel_bst::Tree;
///
/// let tree = Tree::build([1, 2, 3]);
/// assert_eq!(tree.to_string(), "2\n 1\n 3\n");
/// ```
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending: Vec<_> = self.root().map(|root| (root, 0)).into_iter().collect();

        while let Some((node, depth)) = pending.pop() {
            writeln!(f, "{:depth$}{}", "", node.value())?;
            pending.extend(node.right().node().map(|n| (n, depth + 1)));
            pending.extend(node.left().node().map(|n| (n, depth + 1)));
        }

        Ok(())
    }
}

/// A summary of a single node and its immediate children.
impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Value = {}", self.value())?;
        writeln!(f, "  Left child = {}", Child(self.left()))?;
        write!(f, "  Right child = {}", Child(self.right()))
    }
}

struct Child<'a, T>(&'a Subtree<T>);

impl<T: fmt::Display> fmt::Display for Child<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.node() {
            Some(node) => write!(f, "{}", node.value()),
            None => f.write_str(LEAF),
        }
    }
}

/// Shows the tree's bookkeeping and its values in ascending order rather than its shape.
impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field("strategy", &self.strategy())
            .field("values", &Values(self))
            .finish()
    }
}

struct Values<'a, T>(&'a Tree<T>);

impl<T: fmt::Debug> fmt::Debug for Values<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Only the values of the immediate children are shown, never whole subtrees.
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("left", &self.left().node().map(Node::value))
            .field("right", &self.right().node().map(Node::value))
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Subtree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Some(node) => f.debug_tuple("Node").field(node).finish(),
            None => f.write_str("Leaf"),
        }
    }
}

impl<T: fmt::Display> Tree<T> {
    /// Draws the tree with box-drawing characters. A sentinel child is only drawn when its
    /// sibling isn't one, so left and right can still be told apart.
    ///
    /// The conversion itself uses a stack, but printing and dropping a `termtree::Tree` recurse
    /// once per level. Rebalance a skewed tree before drawing it.
    ///
    /// ```
    /// use sentinel_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.extend([2, 3]);
    ///
    /// let drawn = tree.to_termtree().to_string();
    /// assert!(drawn.starts_with("2\n"));
    /// assert!(drawn.contains("<leaf>"));
    /// ```
    pub fn to_termtree(&self) -> termtree::Tree<String> {
        match self.root() {
            Some(root) => node_to_termtree(root),
            None => termtree::Tree::new("<empty>".to_string()),
        }
    }
}

fn node_to_termtree<T: fmt::Display>(root: &Node<T>) -> termtree::Tree<String> {
    enum Step<'a, T> {
        Visit(&'a Subtree<T>),
        Join(&'a Node<T>),
    }

    let mut steps = vec![
        Step::Join(root),
        Step::Visit(root.right()),
        Step::Visit(root.left()),
    ];
    let mut drawn: Vec<termtree::Tree<String>> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(subtree) => match subtree.node() {
                Some(node) => steps.extend([
                    Step::Join(node),
                    Step::Visit(node.right()),
                    Step::Visit(node.left()),
                ]),
                None => drawn.push(termtree::Tree::new(LEAF.to_string())),
            },
            Step::Join(node) => {
                let right = drawn.pop().expect("Right child is drawn before its parent");
                let left = drawn.pop().expect("Left child is drawn before its parent");
                let tree = termtree::Tree::new(node.value().to_string());

                drawn.push(if node.left().is_leaf() && node.right().is_leaf() {
                    tree
                } else {
                    tree.with_leaves([left, right])
                });
            }
        }
    }

    drawn.pop().expect("The root is drawn last")
}
