//! Heap configuration parameters.

use ward_core::ConfigError;

/// Configuration for a [`Heap`](crate::Heap) or [`OwnedBlock`](crate::OwnedBlock).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Largest single block in bytes.
    ///
    /// Default: 1 GiB. Requests above this fail with
    /// [`SizeError::ExceedsLimit`](ward_core::SizeError::ExceedsLimit)
    /// before any allocation. Must be at least 1.
    pub max_block_bytes: usize,

    /// Maximum number of simultaneously live blocks.
    ///
    /// Default: 65 536. Must be at least 1.
    pub max_live_blocks: u32,
}

impl HeapConfig {
    /// Default per-block limit: 1 GiB.
    pub const DEFAULT_MAX_BLOCK_BYTES: usize = 1 << 30;

    /// Default live block limit.
    pub const DEFAULT_MAX_LIVE_BLOCKS: u32 = 65_536;

    /// Create a config with the default limits.
    pub fn new() -> Self {
        Self {
            max_block_bytes: Self::DEFAULT_MAX_BLOCK_BYTES,
            max_live_blocks: Self::DEFAULT_MAX_LIVE_BLOCKS,
        }
    }

    /// Set the per-block byte limit.
    pub fn with_max_block_bytes(mut self, bytes: usize) -> Self {
        self.max_block_bytes = bytes;
        self
    }

    /// Set the live block limit.
    pub fn with_max_live_blocks(mut self, blocks: u32) -> Self {
        self.max_live_blocks = blocks;
        self
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroBlockLimit`] or [`ConfigError::ZeroLiveLimit`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_block_bytes == 0 {
            return Err(ConfigError::ZeroBlockLimit);
        }
        if self.max_live_blocks == 0 {
            return Err(ConfigError::ZeroLiveLimit);
        }
        Ok(())
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HeapConfig::default();
        assert_eq!(config.max_block_bytes, 1024 * 1024 * 1024);
        assert_eq!(config.max_live_blocks, 65_536);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_block_limit_rejected() {
        let config = HeapConfig::new().with_max_block_bytes(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBlockLimit));
    }

    #[test]
    fn zero_live_limit_rejected() {
        let config = HeapConfig::new().with_max_live_blocks(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroLiveLimit));
    }
}
