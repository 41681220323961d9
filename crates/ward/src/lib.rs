//! Ward: checked, panic-free replacements for classic native-code memory
//! and concurrency bugs.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Ward sub-crates, plus [`scenarios`] that replay each classic defect
//! against the safe API.
//!
//! # Quick start
//!
//! ```rust
//! use ward::prelude::*;
//!
//! // A 26-byte string does not fit a 10-byte buffer.
//! let mut buf = FixedBuffer::new(10);
//! let err = buf.copy_from(b"This is a very long string", OverflowPolicy::Reject);
//! assert!(matches!(err, Err(CopyError::CapacityExceeded { source_len: 26, capacity: 10 })));
//!
//! // Released handles are dead for every operation.
//! let mut heap = Heap::default();
//! let id = heap.alloc_bytes(10).unwrap();
//! heap.release(id).unwrap();
//! assert!(matches!(heap.release(id), Err(HandleError::DoubleFree { .. })));
//!
//! // Balanced concurrent adjustments always cancel out.
//! let report = run_balanced(&CounterConfig::new(1_000)).unwrap();
//! assert_eq!(report.final_value, 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ward-core` | Block handles and the core error taxonomy |
//! | [`buffer`] | `ward-buffer` | Bounded copy and fixed-capacity buffers |
//! | [`arena`] | `ward-arena` | Checked sizing, generation-tagged heap, owned blocks |
//! | [`seq`] | `ward-seq` | Removal of matching elements without skipping |
//! | [`sync`] | `ward-sync` | Race-free counters and the balanced runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod scenarios;

pub use error::WardError;

/// Block handles and the core error taxonomy (`ward-core`).
pub use ward_core as types;

/// Bounded copy and fixed-capacity buffers (`ward-buffer`).
pub use ward_buffer as buffer;

/// Checked sizing, the generation-tagged [`arena::Heap`], and
/// [`arena::OwnedBlock`] (`ward-arena`).
pub use ward_arena as arena;

/// Order-preserving removal (`ward-seq`).
pub use ward_seq as seq;

/// Race-free counters and [`sync::run_balanced`] (`ward-sync`).
pub use ward_sync as sync;

/// Common imports for typical Ward usage.
///
/// ```rust
/// use ward::prelude::*;
/// ```
pub mod prelude {
    // Handles and errors
    pub use ward_core::{Access, BlockId, ConfigError, CopyError, HandleError, SizeError};

    // Buffers
    pub use ward_buffer::{bounded_copy, truncating_copy, FixedBuffer, OverflowPolicy};

    // Heap
    pub use ward_arena::{checked_size, checked_size_i32, ArenaError, Heap, HeapConfig, OwnedBlock};

    // Sequences
    pub use ward_seq::{extract_where, remove_where, without_matching};

    // Counters
    pub use ward_sync::{
        run_balanced, AtomicCounter, CounterConfig, CounterStrategy, MutexCounter, RaceReport,
        SharedCounter,
    };

    pub use crate::WardError;
}
