//! Safe filtered removal for Ward.
//!
//! Erasing from a vector while iterating over it invalidates the
//! iterator: the element after each erased one is skipped, and the
//! position past the end can be dereferenced. This crate offers the two
//! safe replacements:
//!
//! - **build a new sequence**: [`without_matching`] clones the kept
//!   elements out; [`extract_where`] moves every element out by value and
//!   partitions into kept and removed vectors;
//! - **two-index compaction**: [`remove_where`] keeps a read index and a
//!   write index into the same vector and only truncates once traversal
//!   is complete, so no position is used after the storage under it has
//!   shifted.
//!
//! All three keep exactly the elements for which the predicate is false,
//! in their original relative order, and evaluate the predicate once per
//! element, front to back.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compact;

pub use compact::{extract_where, remove_where, without_matching};
