//! The building blocks of a [`Tree`][crate::Tree].
//!
//! Every position in a tree holds a [`Subtree`]: either the [`Leaf`][Subtree::Leaf] sentinel
//! marking "nothing here" or a boxed [`Node`]. A `Node` always has exactly two children, each of
//! which is again a `Subtree`, so there is never a question of whether a child "exists". The
//! sentinel itself never has children.

use std::cmp::Ordering;
use std::mem;

/// One of the two children of a [`Node`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A position in the tree. This is either empty (the sentinel [`Leaf`][Subtree::Leaf]) or holds
/// a [`Node`] with a value and two children of its own.
pub enum Subtree<T> {
    /// A marker for the empty position at the bottom of a subtree.
    Leaf,
    /// A data-bearing `Node`. This trivially wraps the [`Node`] struct.
    Node(Box<Node<T>>),
}

impl<T> Default for Subtree<T> {
    fn default() -> Self {
        Self::Leaf
    }
}

/// Copies the subtree bottom-up with an explicit stack so that a long chain can't overflow the
/// call stack.
impl<T: Clone> Clone for Subtree<T> {
    fn clone(&self) -> Self {
        enum Step<'a, T> {
            Visit(&'a Subtree<T>),
            Join(&'a T),
        }

        let mut steps = vec![Step::Visit(self)];
        let mut copied: Vec<Self> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Self::Leaf) => copied.push(Self::Leaf),
                Step::Visit(Self::Node(node)) => {
                    steps.push(Step::Join(&node.value));
                    steps.push(Step::Visit(&node.right));
                    steps.push(Step::Visit(&node.left));
                }
                Step::Join(value) => {
                    // Both children of this node were copied just before it.
                    let right = copied.pop().unwrap_or_default();
                    let left = copied.pop().unwrap_or_default();
                    copied.push(Self::Node(Box::new(Node {
                        value: value.clone(),
                        left,
                        right,
                    })));
                }
            }
        }

        copied.pop().unwrap_or_default()
    }
}

impl<T> Subtree<T> {
    /// Whether this position is the empty sentinel.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// The node at this position, if there is one.
    pub fn node(&self) -> Option<&Node<T>> {
        match self {
            Self::Leaf => None,
            Self::Node(n) => Some(n.as_ref()),
        }
    }

    /// How many levels of nodes are in this subtree. A sentinel [`Leaf`][Subtree::Leaf] has a
    /// depth of 0 and a node whose children are both leaves has a depth of 1.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0)];

        while let Some((subtree, depth)) = stack.pop() {
            if let Self::Node(node) = subtree {
                max_depth = max_depth.max(depth + 1);
                stack.push((&node.left, depth + 1));
                stack.push((&node.right, depth + 1));
            }
        }

        max_depth
    }

    /// Takes the contents of this position, leaving a sentinel behind.
    pub(crate) fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Puts `other` into this position without the parent having to know about it.
    pub(crate) fn replace_with(&mut self, other: Self) {
        *self = other;
    }

    /// Turns this position into a node holding `value` with two sentinel children.
    pub(crate) fn materialize(&mut self, value: T) -> &mut Node<T> {
        self.replace_with(Self::Node(Box::new(Node::new(value))));
        match self {
            Self::Node(node) => node.as_mut(),
            Self::Leaf => unreachable!("A position was just given a node."),
        }
    }

    /// Finds the node holding `value` in this subtree.
    pub(crate) fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self;
        while let Self::Node(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => &node.left,
                Ordering::Equal => return Some(node.as_ref()),
                Ordering::Greater => &node.right,
            };
        }

        None
    }

    /// Finds the position holding the node with `value` so that it can be removed in place.
    pub(crate) fn slot_mut(&mut self, value: &T) -> Option<&mut Self>
    where
        T: Ord,
    {
        let mut slot = self;
        loop {
            let ordering = match &*slot {
                Self::Leaf => return None,
                Self::Node(node) => value.cmp(&node.value),
            };
            if ordering == Ordering::Equal {
                return Some(slot);
            }

            let Self::Node(node) = slot else {
                return None;
            };
            slot = match ordering {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }
    }

    /// Walks down to the sentinel where `value` belongs. Equal values go to the right.
    pub(crate) fn vacant_slot_mut(&mut self, value: &T) -> &mut Self
    where
        T: Ord,
    {
        let mut slot = self;
        while let Self::Node(node) = slot {
            slot = if *value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        slot
    }

    /// The node furthest to the given side, i.e. the minimum for [`Side::Left`] and the maximum
    /// for [`Side::Right`].
    pub(crate) fn extreme(&self, side: Side) -> Option<&Node<T>> {
        let mut found = self.node()?;
        while let Self::Node(next) = found.child(side) {
            found = next.as_ref();
        }

        Some(found)
    }

    /// Removes the node furthest to the given side and returns its value. That node has a
    /// sentinel on `side` so its other child is spliced into its position.
    pub(crate) fn take_extreme(&mut self, side: Side) -> Option<T> {
        let mut slot = self;
        loop {
            match &*slot {
                Self::Leaf => return None,
                Self::Node(node) if node.child(side).is_leaf() => break,
                Self::Node(_) => {}
            }

            let Self::Node(node) = slot else {
                return None;
            };
            slot = node.child_mut(side);
        }

        let Self::Node(node) = slot.take() else {
            return None;
        };
        let (value, left, right) = node.into_parts();
        slot.replace_with(match side {
            Side::Left => right,
            Side::Right => left,
        });

        Some(value)
    }

    /// Removes the node at this position and returns its value.
    ///
    /// With at most one real child, that child (or a sentinel) takes the node's place. With two,
    /// the value of the predecessor or successor is copied up and that node is removed from
    /// where it was. The predecessor is used when the left subtree is strictly deeper and the
    /// successor otherwise.
    pub(crate) fn remove(&mut self) -> Option<T> {
        if let Self::Node(node) = self {
            if !node.left.is_leaf() && !node.right.is_leaf() {
                let taller = if node.left.depth() > node.right.depth() {
                    Side::Left
                } else {
                    Side::Right
                };
                let substitute = node
                    .child_mut(taller)
                    .take_extreme(taller.opposite())
                    .expect("A non-leaf subtree has an extreme node");

                return Some(mem::replace(&mut node.value, substitute));
            }
        }

        let Self::Node(node) = self.take() else {
            return None;
        };
        let (value, left, right) = node.into_parts();
        self.replace_with(if left.is_leaf() { right } else { left });

        Some(value)
    }
}

/// A `Node` holds a value and always has two children although those children may be
/// [`Leaf`][Subtree::Leaf]s.
///
/// Nodes are compared by their values alone.
#[derive(Clone)]
pub struct Node<T> {
    value: T,
    left: Subtree<T>,
    right: Subtree<T>,
}

impl<T> Node<T> {
    /// Construct a new `Node` with the given `value` and two sentinel children.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            left: Subtree::Leaf,
            right: Subtree::Leaf,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The subtree holding every value less than this one.
    pub fn left(&self) -> &Subtree<T> {
        &self.left
    }

    /// The subtree holding every value greater than this one.
    pub fn right(&self) -> &Subtree<T> {
        &self.right
    }

    pub(crate) fn set_left(&mut self, left: Subtree<T>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Subtree<T>) {
        self.right = right;
    }

    pub(crate) fn child(&self, side: Side) -> &Subtree<T> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Subtree<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Splits a node into its value and children.
    pub(crate) fn into_parts(self) -> (T, Subtree<T>, Subtree<T>) {
        (self.value, self.left, self.right)
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Node<T> {}

impl<T: Ord> PartialOrd for Node<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Node<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}
