//! This crate exposes a Binary Search Tree (BST) that marks its empty positions with explicit
//! sentinel leaves and keeps itself balanced only when asked to.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Here, a missing child is never "nothing". It is a [`Subtree::Leaf`], a sentinel that holds
//! > no value and has no children of its own.
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)`. This tree doesn't rebalance as it goes, so a run of
//! sorted inserts degrades it into a chain. [`Tree::is_balanced`] checks the root for that and
//! [`Tree::rebalance`] rebuilds the tree from its sorted values, which brings the height back
//! down to `O(lg N)` where `N` is the number of nodes in the tree.
//!
//! BSTs also naturally support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree. All four classic [`Order`]s are available, each walked either
//! recursively or with an explicit stack or queue (see [`Strategy`]).
//!
//! # Examples
//!
//! ```
//! use sentinel_bst::Tree;
//!
//! let mut tree = Tree::build([5, 3, 8, 1, 4, 7, 9]);
//!
//! assert_eq!(tree.inorder(), vec![&1, &3, &4, &5, &7, &8, &9]);
//! assert_eq!(tree.find(&4).map(|node| *node.value()), Some(4));
//! assert_eq!(tree.is_balanced(), Ok(true));
//!
//! tree.delete(&1);
//! assert!(tree.find(&1).is_none());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod build;
mod error;
mod node;
mod render;
mod traversal;
mod tree;


pub use error::{TreeError, TreeResult};
pub use node::{Node, Subtree};
pub use traversal::{Iter, Order, Strategy};
pub use tree::Tree;
