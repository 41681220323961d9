//! Generation-tagged block heap.
//!
//! [`Heap`] is a slab of slots. Each slot holds either a live,
//! zero-initialised `Box<[u8]>` or nothing (released), plus a generation
//! counter. A [`BlockId`] is valid only while its generation matches the
//! slot's and the slot is live; anything else is rejected before the
//! storage is touched.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use tracing::{debug, warn};
use ward_buffer::bounded_copy;
use ward_core::{Access, BlockId, ConfigError, HandleError};

use crate::config::HeapConfig;
use crate::error::ArenaError;
use crate::sizing::block_size;
use crate::stats::HeapStats;

/// A single heap slot.
#[derive(Debug)]
struct Slot {
    /// Bumped each time the slot is reused.
    generation: u32,
    /// `None` once released.
    data: Option<Box<[u8]>>,
}

/// Slab allocator that turns use-after-free and double free into errors.
///
/// Released slots go onto a LIFO free list and are handed out again with
/// the next generation, so a stale [`BlockId`] can never alias a newer
/// block. A slot whose generation reaches `u32::MAX` is retired instead
/// of reused.
///
/// Reads take `&self`; writes and releases take `&mut self`, so the
/// borrow checker rules out a release while a block is borrowed.
#[derive(Debug)]
pub struct Heap {
    config: HeapConfig,
    slots: Vec<Slot>,
    /// Released slot indices available for reuse.
    free_list: Vec<u32>,
    /// Live slot index → block length, in allocation order.
    live: IndexMap<u32, usize>,
    counters: HeapStats,
    /// Counted through `&self` reads, hence atomic.
    rejected_accesses: AtomicU64,
}

impl Heap {
    /// Create an empty heap.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`HeapConfig::validate`].
    pub fn new(config: HeapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            slots: Vec::new(),
            free_list: Vec::new(),
            live: IndexMap::new(),
            counters: HeapStats::default(),
            rejected_accesses: AtomicU64::new(0),
        })
    }

    /// The configuration this heap was built with.
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Allocate a zero-filled block of `count * elem_size` bytes.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::Size`] if the size overflows or exceeds
    ///   [`HeapConfig::max_block_bytes`].
    /// - [`ArenaError::LiveLimitReached`] at [`HeapConfig::max_live_blocks`].
    ///
    /// Nothing is allocated on any error path.
    pub fn alloc(&mut self, count: usize, elem_size: usize) -> Result<BlockId, ArenaError> {
        let len = match block_size(count, elem_size, &self.config) {
            Ok(len) => len,
            Err(e) => {
                self.counters.rejected_allocs += 1;
                debug!(count, elem_size, error = %e, "allocation rejected");
                return Err(e.into());
            }
        };
        if self.live.len() >= self.config.max_live_blocks as usize {
            self.counters.rejected_allocs += 1;
            debug!(len, limit = self.config.max_live_blocks, "live block limit reached");
            return Err(ArenaError::LiveLimitReached {
                limit: self.config.max_live_blocks,
            });
        }

        let data = vec![0u8; len].into_boxed_slice();
        let id = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                // Retired slots never enter the free list, so this cannot wrap.
                slot.generation += 1;
                slot.data = Some(data);
                self.counters.slot_reuses += 1;
                BlockId::new(index, slot.generation)
            }
            None => {
                let index = u32::try_from(self.slots.len()).map_err(|_| {
                    ArenaError::LiveLimitReached {
                        limit: self.config.max_live_blocks,
                    }
                })?;
                self.slots.push(Slot {
                    generation: 0,
                    data: Some(data),
                });
                BlockId::new(index, 0)
            }
        };

        self.live.insert(id.index(), len);
        self.counters.total_allocs += 1;
        debug!(block = %id, len, "allocated");
        Ok(id)
    }

    /// Allocate a zero-filled block of `len` bytes.
    ///
    /// # Errors
    ///
    /// As [`Heap::alloc`].
    pub fn alloc_bytes(&mut self, len: usize) -> Result<BlockId, ArenaError> {
        self.alloc(len, 1)
    }

    /// Borrow a live block's contents.
    ///
    /// # Errors
    ///
    /// [`HandleError::UseAfterFree`] for a released block,
    /// [`HandleError::UnknownBlock`] for a handle this heap never issued.
    pub fn read(&self, id: BlockId) -> Result<&[u8], HandleError> {
        let result = Self::resolve(&self.slots, id, Access::Read);
        if let Err(e) = &result {
            self.note_rejected_access(e);
        }
        result
    }

    /// Borrow `len` bytes of a live block starting at `offset`.
    ///
    /// # Errors
    ///
    /// As [`Heap::read`], plus [`HandleError::OutOfBounds`] when the range
    /// extends past the block.
    pub fn read_at(&self, id: BlockId, offset: usize, len: usize) -> Result<&[u8], HandleError> {
        let data = self.read(id)?;
        match offset.checked_add(len) {
            Some(end) if end <= data.len() => Ok(&data[offset..end]),
            _ => {
                let e = HandleError::OutOfBounds {
                    block: id,
                    offset,
                    len,
                    block_len: data.len(),
                };
                self.note_rejected_access(&e);
                Err(e)
            }
        }
    }

    /// Mutably borrow a live block's contents.
    ///
    /// # Errors
    ///
    /// As [`Heap::read`].
    pub fn write(&mut self, id: BlockId) -> Result<&mut [u8], HandleError> {
        let result = Self::resolve_mut(&mut self.slots, id, Access::Write);
        if let Err(e) = &result {
            self.rejected_accesses.fetch_add(1, Ordering::Relaxed);
            debug!(error = %e, "access rejected");
        }
        result
    }

    /// Copy `src` into a live block with a `0` terminator.
    ///
    /// Returns the number of payload bytes written.
    ///
    /// # Errors
    ///
    /// [`ArenaError::Handle`] for a released or unknown block,
    /// [`ArenaError::Copy`] if `src` does not fit (the block is untouched).
    pub fn copy_into(&mut self, id: BlockId, src: &[u8]) -> Result<usize, ArenaError> {
        let dest = self.write(id)?;
        Ok(bounded_copy(dest, src)?)
    }

    /// Release a live block, returning its length in bytes.
    ///
    /// # Errors
    ///
    /// [`HandleError::DoubleFree`] if the block was already released,
    /// [`HandleError::UnknownBlock`] for a handle this heap never issued.
    pub fn release(&mut self, id: BlockId) -> Result<usize, HandleError> {
        let taken = self
            .slots
            .get_mut(id.index() as usize)
            .ok_or(HandleError::UnknownBlock { block: id })
            .and_then(|slot| {
                check_generation(slot.generation, id, Access::Release)?;
                let generation = slot.generation;
                let data = slot
                    .data
                    .take()
                    .ok_or(HandleError::DoubleFree { block: id })?;
                Ok((generation, data.len()))
            });

        let (generation, len) = match taken {
            Ok(pair) => pair,
            Err(e) => {
                self.counters.rejected_releases += 1;
                warn!(error = %e, "release rejected");
                return Err(e);
            }
        };

        self.live.shift_remove(&id.index());
        if generation == u32::MAX {
            self.counters.retired_slots += 1;
            debug!(block = %id, "slot generation exhausted, retiring");
        } else {
            self.free_list.push(id.index());
        }
        self.counters.total_releases += 1;
        debug!(block = %id, len, "released");
        Ok(len)
    }

    /// Whether `id` names a live block.
    pub fn is_live(&self, id: BlockId) -> bool {
        Self::resolve(&self.slots, id, Access::Read).is_ok()
    }

    /// Number of live blocks.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total bytes held by live blocks.
    pub fn live_bytes(&self) -> usize {
        self.live.values().sum()
    }

    /// Live blocks and their lengths, in allocation order.
    ///
    /// Anything still listed when the heap is dropped is reported as a leak.
    pub fn leaks(&self) -> impl Iterator<Item = (BlockId, usize)> + '_ {
        self.live.iter().map(|(&index, &len)| {
            let generation = self.slots[index as usize].generation;
            (BlockId::new(index, generation), len)
        })
    }

    /// Snapshot of the heap's counters.
    pub fn stats(&self) -> HeapStats {
        HeapStats {
            live_blocks: self.live.len() as u32,
            live_bytes: self.live_bytes(),
            rejected_accesses: self.rejected_accesses.load(Ordering::Relaxed),
            ..self.counters.clone()
        }
    }

    fn resolve(slots: &[Slot], id: BlockId, access: Access) -> Result<&[u8], HandleError> {
        let slot = slots
            .get(id.index() as usize)
            .ok_or(HandleError::UnknownBlock { block: id })?;
        check_generation(slot.generation, id, access)?;
        slot.data
            .as_deref()
            .ok_or(HandleError::UseAfterFree { block: id, access })
    }

    fn resolve_mut(
        slots: &mut [Slot],
        id: BlockId,
        access: Access,
    ) -> Result<&mut [u8], HandleError> {
        let slot = slots
            .get_mut(id.index() as usize)
            .ok_or(HandleError::UnknownBlock { block: id })?;
        check_generation(slot.generation, id, access)?;
        slot.data
            .as_deref_mut()
            .ok_or(HandleError::UseAfterFree { block: id, access })
    }

    fn note_rejected_access(&self, e: &HandleError) {
        self.rejected_accesses.fetch_add(1, Ordering::Relaxed);
        debug!(error = %e, "access rejected");
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self {
            config: HeapConfig::default(),
            slots: Vec::new(),
            free_list: Vec::new(),
            live: IndexMap::new(),
            counters: HeapStats::default(),
            rejected_accesses: AtomicU64::new(0),
        }
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        if self.live.is_empty() {
            return;
        }
        warn!(
            blocks = self.live.len(),
            bytes = self.live_bytes(),
            "heap dropped with live blocks"
        );
        for (id, len) in self.leaks() {
            warn!(block = %id, len, "leaked block");
        }
    }
}

/// Compare a handle's generation against its slot's.
///
/// A newer handle was never issued; an older one outlived its block.
fn check_generation(slot_generation: u32, id: BlockId, access: Access) -> Result<(), HandleError> {
    match id.generation().cmp(&slot_generation) {
        CmpOrdering::Equal => Ok(()),
        CmpOrdering::Greater => Err(HandleError::UnknownBlock { block: id }),
        CmpOrdering::Less => Err(stale(id, access)),
    }
}

fn stale(id: BlockId, access: Access) -> HandleError {
    match access {
        Access::Release => HandleError::DoubleFree { block: id },
        Access::Read | Access::Write => HandleError::UseAfterFree { block: id, access },
    }
}
