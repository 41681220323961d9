//! Bounds-checked byte copies for Ward.
//!
//! Replaces unchecked `strcpy`-style copies into fixed-size buffers.
//! Every copy reserves one byte for a `0` terminator, never writes past
//! the destination, and reports [`CopyError::CapacityExceeded`] instead
//! of overflowing.
//!
//! Two layers are provided:
//!
//! - [`bounded_copy`] / [`truncating_copy`] operate on any `&mut [u8]`.
//! - [`FixedBuffer`] owns a fixed-capacity allocation and tracks the
//!   payload length, selecting behaviour with an [`OverflowPolicy`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod copy;
pub mod fixed;

pub use copy::{bounded_copy, truncating_copy};
pub use fixed::{FixedBuffer, OverflowPolicy};
pub use ward_core::CopyError;
