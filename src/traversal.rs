//! The orders a [`Tree`][crate::Tree] can be walked in and the two engines that walk them.
//!
//! Both [`Strategy`]s visit nodes in exactly the same order. [`Strategy::Recursive`] uses the
//! call stack and is the easiest to read. [`Strategy::Iterative`] keeps its pending work on the
//! heap so that very deep (unbalanced) trees can't overflow the stack.

use std::collections::VecDeque;

use crate::node::{Node, Subtree};

/// The order in which a traversal visits nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, then the node, then the right subtree. Yields values in ascending order.
    Inorder,
    /// The node, then its left subtree, then its right subtree.
    Preorder,
    /// Left subtree, then right subtree, then the node.
    Postorder,
    /// Breadth first: every node of one level, left to right, before the next level.
    LevelOrder,
}

/// How a traversal keeps track of the nodes it still has to visit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Plain recursion. Level order is walked one level at a time.
    Recursive,
    /// An explicit stack for the depth-first orders and a queue for level order.
    #[default]
    Iterative,
}

/// Walks the subtree in `order`, calling `visit` on each node and collecting its value.
pub(crate) fn walk<'a, T, F>(
    root: &'a Subtree<T>,
    order: Order,
    strategy: Strategy,
    mut visit: F,
) -> Vec<&'a T>
where
    F: FnMut(&'a Node<T>),
{
    let mut visited = Vec::new();
    let mut emit = |node: &'a Node<T>| {
        visit(node);
        visited.push(node.value());
    };

    match (strategy, order) {
        (Strategy::Recursive, Order::LevelOrder) => {
            for level in 0..root.depth() {
                recursive_level(root, level, &mut emit);
            }
        }
        (Strategy::Recursive, order) => recursive_depth_first(root, order, &mut emit),
        (Strategy::Iterative, Order::LevelOrder) => queued_levels(root, &mut emit),
        (Strategy::Iterative, order) => stacked_depth_first(root, order, &mut emit),
    }

    visited
}

fn recursive_depth_first<'a, T, F>(subtree: &'a Subtree<T>, order: Order, emit: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    let Some(node) = subtree.node() else {
        return;
    };

    if order == Order::Preorder {
        emit(node);
    }
    recursive_depth_first(node.left(), order, emit);
    if order == Order::Inorder {
        emit(node);
    }
    recursive_depth_first(node.right(), order, emit);
    if order == Order::Postorder {
        emit(node);
    }
}

/// Emits the nodes `level` levels below `subtree`, left to right.
fn recursive_level<'a, T, F>(subtree: &'a Subtree<T>, level: usize, emit: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    let Some(node) = subtree.node() else {
        return;
    };

    if level == 0 {
        emit(node);
    } else {
        recursive_level(node.left(), level - 1, emit);
        recursive_level(node.right(), level - 1, emit);
    }
}

/// What to do with a node popped off the traversal stack.
enum Pending<'a, T> {
    /// Push its children and itself back in the right order.
    Expand(&'a Node<T>),
    /// Visit it.
    Emit(&'a Node<T>),
}

fn stacked_depth_first<'a, T, F>(root: &'a Subtree<T>, order: Order, emit: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    let mut stack: Vec<_> = root.node().map(Pending::Expand).into_iter().collect();

    while let Some(pending) = stack.pop() {
        let node = match pending {
            Pending::Emit(node) => {
                emit(node);
                continue;
            }
            Pending::Expand(node) => node,
        };

        let here = Some(Pending::Emit(node));
        let left = node.left().node().map(Pending::Expand);
        let right = node.right().node().map(Pending::Expand);
        let [first, second, third] = match order {
            Order::Preorder => [here, left, right],
            Order::Inorder => [left, here, right],
            Order::Postorder => [left, right, here],
            Order::LevelOrder => unreachable!("Level order is walked with a queue."),
        };

        // Last in, first out.
        stack.extend([third, second, first].into_iter().flatten());
    }
}

fn queued_levels<'a, T, F>(root: &'a Subtree<T>, emit: &mut F)
where
    F: FnMut(&'a Node<T>),
{
    let mut queue: VecDeque<_> = root.node().into_iter().collect();

    while let Some(node) = queue.pop_front() {
        emit(node);
        queue.extend(node.left().node());
        queue.extend(node.right().node());
    }
}

/// A lazy, ascending iterator over the values of a [`Tree`][crate::Tree].
///
/// Created by [`Tree::iter`][crate::Tree::iter].
pub struct Iter<'a, T> {
    /// Nodes whose left subtree has been queued up but who haven't been yielded yet.
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Subtree<T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut subtree: &'a Subtree<T>) {
        while let Some(node) = subtree.node() {
            self.stack.push(node);
            subtree = node.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(node.right());
        Some(node.value())
    }
}
