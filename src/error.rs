use thiserror::Error;

use crate::Offset;

/// Errors returned by [`BitSet`](crate::BitSet) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An offset was negative or not below the set's offset limit.
    #[error("bit offset {offset} is out of range [0, {limit})")]
    OutOfRange { offset: Offset, limit: Offset },

    /// A serialized payload could not be parsed as an array of integers.
    #[error("malformed serialized form: {0}")]
    MalformedSerializedForm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
