use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::{Config, Error, Offset, Result};

/// A set of non-negative integers stored one bit per offset in a byte buffer
/// that grows on demand.
///
/// Bits are packed most-significant first: offset `o` lives in byte `o >> 3`
/// under mask `0x80 >> (o & 7)`. Offsets past the end of the buffer read as
/// absent. The buffer never shrinks.
#[derive(Clone, Default)]
pub struct BitSet {
    bytes: Vec<u8>,
    len: usize,
    config: Config,
}

#[derive(Clone, Copy)]
struct Bit {
    byte: usize,
    mask: u8,
}

impl BitSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            bytes: Vec::new(),
            len: 0,
            config,
        }
    }

    /// Builds a set holding `values`, sizing the buffer once for the largest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any value is outside the default limit.
    pub fn from_values(values: &[Offset]) -> Result<Self> {
        Self::from_values_with_config(Config::default(), values)
    }

    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any value is outside `config`'s limit.
    pub fn from_values_with_config(config: Config, values: &[Offset]) -> Result<Self> {
        let mut set = Self::with_config(config);
        set.add(values)?;
        Ok(set)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of members. Cached, not recounted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current length of the backing buffer in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Inserts one offset, returning whether it was absent before.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for offsets outside the limit.
    pub fn insert(&mut self, offset: Offset) -> Result<bool> {
        let bit = self.locate(offset)?;
        self.grow(bit.byte + 1);
        Ok(self.set_bit(bit))
    }

    /// Removes one offset, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for offsets outside the limit.
    pub fn delete(&mut self, offset: Offset) -> Result<bool> {
        let bit = self.locate(offset)?;
        Ok(self.clear_bit(bit))
    }

    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for offsets outside the limit.
    pub fn test(&self, offset: Offset) -> Result<bool> {
        Ok(self.get_bit(self.locate(offset)?))
    }

    /// Inserts every item. Nothing is inserted unless all items are in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for the first item outside the limit.
    pub fn add(&mut self, items: &[Offset]) -> Result<()> {
        let bits = self.locate_all(items)?;
        if let Some(byte_len) = bits.iter().map(|bit| bit.byte + 1).max() {
            self.grow(byte_len);
        }
        for bit in bits {
            self.set_bit(bit);
        }
        Ok(())
    }

    /// Removes every item that is present. Nothing is removed unless all
    /// items are in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for the first item outside the limit.
    pub fn remove(&mut self, items: &[Offset]) -> Result<()> {
        for bit in self.locate_all(items)? {
            self.clear_bit(bit);
        }
        Ok(())
    }

    /// True if every item is a member; true for an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any item is outside the limit, even
    /// when an earlier item is already known to be absent.
    pub fn contains(&self, items: &[Offset]) -> Result<bool> {
        let bits = self.locate_all(items)?;
        Ok(bits.into_iter().all(|bit| self.get_bit(bit)))
    }

    /// Zeroes the buffer without releasing it.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.len = 0;
    }

    /// Members in ascending order.
    #[must_use]
    pub fn values(&self) -> Values<'_> {
        Values {
            bytes: &self.bytes,
            index: 0,
            current: self.bytes.first().copied().unwrap_or(0),
            remaining: self.len,
        }
    }

    fn locate(&self, offset: Offset) -> Result<Bit> {
        let limit = self.config.offset_limit();
        let out_of_range = || Error::OutOfRange { offset, limit };
        if !(0..limit).contains(&offset) {
            return Err(out_of_range());
        }
        let byte = usize::try_from(offset >> 3).map_err(|_| out_of_range())?;
        Ok(Bit {
            byte,
            mask: 0x80u8 >> (offset & 7),
        })
    }

    pub(crate) fn check_range(&self, items: &[Offset]) -> Result<()> {
        items
            .iter()
            .try_for_each(|&offset| self.locate(offset).map(drop))
    }

    fn locate_all(&self, items: &[Offset]) -> Result<Vec<Bit>> {
        items.iter().map(|&offset| self.locate(offset)).collect()
    }

    fn grow(&mut self, byte_len: usize) {
        let old_len = self.bytes.len();
        if old_len >= byte_len {
            return;
        }
        self.bytes.reserve_exact(byte_len - old_len);
        self.bytes.resize(byte_len, 0);
        trace!(from = old_len, to = byte_len, "grew bit set buffer");
    }

    fn get_bit(&self, Bit { byte, mask }: Bit) -> bool {
        self.bytes.get(byte).is_some_and(|b| b & mask != 0)
    }

    fn set_bit(&mut self, Bit { byte, mask }: Bit) -> bool {
        let slot = &mut self.bytes[byte];
        if *slot & mask != 0 {
            return false;
        }
        *slot |= mask;
        self.len += 1;
        true
    }

    fn clear_bit(&mut self, Bit { byte, mask }: Bit) -> bool {
        match self.bytes.get_mut(byte) {
            Some(slot) if *slot & mask != 0 => {
                *slot &= !mask;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.values().eq(other.values())
    }
}

impl Eq for BitSet {}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values()).finish()
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = Offset;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

/// Ascending iterator over the members of a [`BitSet`].
#[derive(Clone)]
pub struct Values<'a> {
    bytes: &'a [u8],
    index: usize,
    // Bits of `bytes[index]` not yet yielded.
    current: u8,
    remaining: usize,
}

impl Iterator for Values<'_> {
    type Item = Offset;

    fn next(&mut self) -> Option<Offset> {
        if self.remaining == 0 {
            return None;
        }
        while self.current == 0 {
            self.index += 1;
            self.current = *self.bytes.get(self.index)?;
        }
        let bit = self.current.leading_zeros();
        self.current &= !(0x80u8 >> bit);
        self.remaining -= 1;
        #[allow(clippy::cast_possible_wrap)]
        let base = (self.index as Offset) << 3;
        Some(base + Offset::from(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Values<'_> {}

impl FusedIterator for Values<'_> {}
