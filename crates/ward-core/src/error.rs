//! Error types for the Ward workspace.
//!
//! Organized by contract: bounded copies ([`CopyError`]), allocation
//! sizing ([`SizeError`]), handle lifecycle ([`HandleError`]), and
//! configuration validation ([`ConfigError`]). Every variant carries the
//! inputs that violated the contract so diagnostics can name them.

use std::error::Error;
use std::fmt;

use crate::id::{Access, BlockId};

/// Errors from bounded copy operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyError {
    /// The source does not fit in the destination with room for the
    /// terminator (`source_len >= capacity`).
    CapacityExceeded {
        /// Length of the source in bytes.
        source_len: usize,
        /// Capacity of the destination in bytes, terminator included.
        capacity: usize,
    },
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                source_len,
                capacity,
            } => write!(
                f,
                "capacity exceeded: source of {source_len} bytes does not fit a \
                 {capacity}-byte destination (at most {} payload bytes)",
                capacity.saturating_sub(1)
            ),
        }
    }
}

impl Error for CopyError {}

/// Errors from computing an allocation size.
///
/// No allocation is attempted when any of these is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SizeError {
    /// `count * elem_size` is not representable.
    InvalidSize {
        /// Requested element count.
        count: u64,
        /// Requested element size in bytes.
        elem_size: u64,
    },
    /// An operand or the product of a signed size computation is negative.
    NegativeSize {
        /// The offending value.
        value: i64,
    },
    /// The computed size is representable but above the configured limit.
    ExceedsLimit {
        /// Computed size in bytes.
        bytes: usize,
        /// Configured per-block limit in bytes.
        limit: usize,
    },
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { count, elem_size } => {
                write!(f, "invalid size: {count} x {elem_size} bytes overflows")
            }
            Self::NegativeSize { value } => write!(f, "invalid size: negative value {value}"),
            Self::ExceedsLimit { bytes, limit } => {
                write!(f, "size {bytes} bytes exceeds block limit of {limit} bytes")
            }
        }
    }
}

impl Error for SizeError {}

/// Errors from using a [`BlockId`] against its heap.
///
/// Returned instead of touching memory: a rejected access never reads
/// or writes the slot's storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandleError {
    /// The block was released; the handle may no longer read or write it.
    UseAfterFree {
        /// The stale handle.
        block: BlockId,
        /// The attempted access.
        access: Access,
    },
    /// The block was already released.
    DoubleFree {
        /// The stale handle.
        block: BlockId,
    },
    /// The handle was never issued by this heap.
    UnknownBlock {
        /// The unrecognised handle.
        block: BlockId,
    },
    /// A sub-range access extends past the end of the block.
    OutOfBounds {
        /// The handle used.
        block: BlockId,
        /// Requested start offset in bytes.
        offset: usize,
        /// Requested length in bytes.
        len: usize,
        /// Actual length of the block in bytes.
        block_len: usize,
    },
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseAfterFree { block, access } => {
                write!(f, "use after free: {access} through released {block}")
            }
            Self::DoubleFree { block } => write!(f, "double free: {block} already released"),
            Self::UnknownBlock { block } => write!(f, "unknown block: {block}"),
            Self::OutOfBounds {
                block,
                offset,
                len,
                block_len,
            } => write!(
                f,
                "out of bounds: {len} bytes at offset {offset} in {block} of {block_len} bytes"
            ),
        }
    }
}

impl Error for HandleError {}

/// Errors detected while validating a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_block_bytes` is zero, so no non-empty block could be allocated.
    ZeroBlockLimit,
    /// `max_live_blocks` is zero, so no block could be allocated.
    ZeroLiveLimit,
    /// A counter run was configured with zero task pairs.
    ZeroPairs,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBlockLimit => write!(f, "max_block_bytes must be at least 1"),
            Self::ZeroLiveLimit => write!(f, "max_live_blocks must be at least 1"),
            Self::ZeroPairs => write!(f, "counter run needs at least one task pair"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exceeded_names_inputs() {
        let e = CopyError::CapacityExceeded {
            source_len: 27,
            capacity: 10,
        };
        let msg = e.to_string();
        assert!(msg.contains("27"));
        assert!(msg.contains("10-byte"));
        assert!(msg.contains("at most 9"));
    }

    #[test]
    fn zero_capacity_message_does_not_underflow() {
        let e = CopyError::CapacityExceeded {
            source_len: 0,
            capacity: 0,
        };
        assert!(e.to_string().contains("at most 0"));
    }

    #[test]
    fn invalid_size_display() {
        let e = SizeError::InvalidSize {
            count: 3000,
            elem_size: 1_000_000,
        };
        assert_eq!(e.to_string(), "invalid size: 3000 x 1000000 bytes overflows");
    }

    #[test]
    fn handle_errors_name_the_block() {
        let block = BlockId::new(4, 2);
        let uaf = HandleError::UseAfterFree {
            block,
            access: Access::Read,
        };
        assert!(uaf.to_string().contains("block#4@g2"));
        assert!(uaf.to_string().contains("read"));
        let df = HandleError::DoubleFree { block };
        assert!(df.to_string().starts_with("double free"));
    }

    #[test]
    fn out_of_bounds_display() {
        let e = HandleError::OutOfBounds {
            block: BlockId::new(0, 0),
            offset: 16,
            len: 8,
            block_len: 20,
        };
        assert_eq!(
            e.to_string(),
            "out of bounds: 8 bytes at offset 16 in block#0@g0 of 20 bytes"
        );
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: Error + Send + Sync + 'static>() {}
        assert_error::<CopyError>();
        assert_error::<SizeError>();
        assert_error::<HandleError>();
        assert_error::<ConfigError>();
    }
}
