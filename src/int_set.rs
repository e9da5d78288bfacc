use crate::{BitSet, Offset, Result, Values};

/// Capability shared by integer-set implementations.
pub trait IntSet {
    type Values<'a>: Iterator<Item = Offset>
    where
        Self: 'a;

    /// # Errors
    ///
    /// Fails without modifying the set if any item cannot be stored.
    fn add(&mut self, items: &[Offset]) -> Result<()>;

    /// # Errors
    ///
    /// Fails without modifying the set if any item is outside the set's range.
    fn remove(&mut self, items: &[Offset]) -> Result<()>;

    /// True if all `items` are members, including when `items` is empty.
    ///
    /// # Errors
    ///
    /// Fails if any item is outside the set's range.
    fn contains(&self, items: &[Offset]) -> Result<bool>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn clear(&mut self);

    /// Members in ascending order.
    fn values(&self) -> Self::Values<'_>;
}

impl IntSet for BitSet {
    type Values<'a> = Values<'a>;

    fn add(&mut self, items: &[Offset]) -> Result<()> {
        BitSet::add(self, items)
    }

    fn remove(&mut self, items: &[Offset]) -> Result<()> {
        BitSet::remove(self, items)
    }

    fn contains(&self, items: &[Offset]) -> Result<bool> {
        BitSet::contains(self, items)
    }

    fn is_empty(&self) -> bool {
        BitSet::is_empty(self)
    }

    fn len(&self) -> usize {
        BitSet::len(self)
    }

    fn clear(&mut self) {
        BitSet::clear(self);
    }

    fn values(&self) -> Self::Values<'_> {
        BitSet::values(self)
    }
}
