//! Ownership-tracked block allocation for Ward.
//!
//! Replaces manual `malloc`/`free` with two lifecycle guards:
//!
//! - [`Heap`]: a runtime guard. Blocks are addressed by generation-tagged
//!   [`BlockId`]s; every read, write, or release through a released
//!   handle fails with [`HandleError::UseAfterFree`] or
//!   [`HandleError::DoubleFree`] without touching memory.
//! - [`OwnedBlock`]: a compile-time guard. `release(self)` consumes the
//!   block, so the borrow checker rejects any later use.
//!
//! Both size their allocations through [`sizing`], which rejects
//! overflowing `count * elem_size` products before allocating.
//!
//! # Slot lifecycle
//!
//! ```text
//! Live(gen g) --release--> Released(gen g) --alloc--> Live(gen g+1)
//!                                 |
//!                                 +-- gen == u32::MAX --> retired forever
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod heap;
pub mod owned;
pub mod sizing;
pub mod stats;

pub use config::HeapConfig;
pub use error::ArenaError;
pub use heap::Heap;
pub use owned::OwnedBlock;
pub use sizing::{checked_size, checked_size_i32};
pub use stats::HeapStats;
pub use ward_core::{Access, BlockId, HandleError, SizeError};
