//! Uniquely owned blocks whose release is enforced by the compiler.

use tracing::debug;
use ward_buffer::bounded_copy;

use crate::config::HeapConfig;
use crate::error::ArenaError;
use crate::sizing::block_size;

/// A zero-initialised byte block with exactly one owner.
///
/// [`release`](OwnedBlock::release) takes `self` by value, so after it
/// returns the block no longer exists and any further read, write, or
/// release is a compile error rather than a runtime check:
///
/// ```compile_fail
/// use ward_arena::{HeapConfig, OwnedBlock};
///
/// let block = OwnedBlock::zeroed(10, 1, &HeapConfig::default()).unwrap();
/// block.release();
/// block.release(); // error[E0382]: use of moved value
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedBlock {
    data: Box<[u8]>,
}

impl OwnedBlock {
    /// Allocate `count * elem_size` zeroed bytes.
    ///
    /// # Errors
    ///
    /// [`ArenaError::Size`] if the size overflows or exceeds
    /// [`HeapConfig::max_block_bytes`]. Nothing is allocated in that case.
    pub fn zeroed(count: usize, elem_size: usize, config: &HeapConfig) -> Result<Self, ArenaError> {
        let len = block_size(count, elem_size, config)?;
        Ok(Self {
            data: vec![0u8; len].into_boxed_slice(),
        })
    }

    /// The block contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The block contents, mutably.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy `src` into the block with a `0` terminator.
    ///
    /// # Errors
    ///
    /// [`ArenaError::Copy`] if `src.len() >= self.len()`; the block is
    /// left untouched.
    pub fn copy_from(&mut self, src: &[u8]) -> Result<usize, ArenaError> {
        Ok(bounded_copy(&mut self.data, src)?)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the block is zero-sized.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Free the block, returning its length in bytes.
    pub fn release(self) -> usize {
        let len = self.data.len();
        debug!(len, "owned block released");
        len
    }
}
