//! Property tests for the public API. Each property holds for any input quickcheck can come up
//! with.

mod tree;

use quickcheck::{Arbitrary, Gen};

/// Something to do to a tree that was built balanced.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the value unless it's already there
    Insert(T),
    /// Remove the value from the tree
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(T::arbitrary(g))
        } else {
            Op::Remove(T::arbitrary(g))
        }
    }
}
