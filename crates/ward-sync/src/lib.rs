//! Race-free shared counters for Ward.
//!
//! Replaces an unsynchronized `value++` / `value--` pair running on two
//! threads. Every adjustment goes through a [`SharedCounter`], which is
//! either a single atomic read-modify-write ([`AtomicCounter`]) or a
//! mutex-guarded update ([`MutexCounter`]), so all adjustments are
//! linearized and the final value is deterministic.
//!
//! [`run_balanced`] reproduces the race scenario safely: `pairs`
//! incrementing and `pairs` decrementing threads, started together
//! behind a barrier and joined before the value is read.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod counter;
pub mod error;
pub mod race;

pub use config::{CounterConfig, CounterStrategy};
pub use counter::{AtomicCounter, MutexCounter, SharedCounter};
pub use error::SyncError;
pub use race::{run_balanced, run_balanced_with, RaceReport, Role};
