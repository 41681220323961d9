//! Strongly-typed identifiers.

use std::fmt;

/// Generation-tagged handle to a block owned by a heap.
///
/// A `BlockId` names one slot at one generation. When the slot is
/// released and later reused, its generation advances, so an old
/// `BlockId` can never resolve to the new occupant. Validity is checked
/// on every access; holding a stale `BlockId` is harmless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct BlockId {
    index: u32,
    generation: u32,
}

impl BlockId {
    /// Create a handle for the given slot index and generation.
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index within the owning heap.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}@g{}", self.index, self.generation)
    }
}

/// The kind of access attempted through a [`BlockId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    /// Shared read of the block contents.
    Read,
    /// Mutable access to the block contents.
    Write,
    /// Release of the block back to the heap.
    Release,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::Release => write!(f, "release"),
        }
    }
}
