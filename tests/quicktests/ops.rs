use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// an indexed tree in a quicktest.
///
/// Identifiers are random so operations that need one pick a node
/// by position among the identifiers handed out so far.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<V> {
    /// Insert the V into the tree
    Insert(V),
    /// Remove the node picked by the index
    Remove(usize),
    /// Set the value of the node picked by the index
    Update(usize, V),
    /// Compare iterators
    Iter,
}

impl<V> Arbitrary for Op<V>
where
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are
    /// weighted up so trees actually grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(V::arbitrary(g)),
            1 => Op::Remove(usize::arbitrary(g)),
            2 => Op::Update(usize::arbitrary(g), V::arbitrary(g)),
            3 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
