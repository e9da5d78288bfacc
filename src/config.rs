use serde::Deserialize;

use crate::Offset;

const DEFAULT_MEMORY_LIMIT: u64 = 512 * 1024 * 1024;

/// Per-set limits. The offset limit is derived from the memory ceiling so a
/// set can never address more than `memory_limit` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Maximum buffer size in bytes.
    pub memory_limit: u64,
}

impl Config {
    #[must_use]
    pub fn with_memory_limit(memory_limit: u64) -> Self {
        Self { memory_limit }
    }

    /// First offset that is no longer a valid element.
    #[must_use]
    pub fn offset_limit(&self) -> Offset {
        Offset::try_from(self.memory_limit)
            .unwrap_or(Offset::MAX)
            .saturating_mul(8)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}
