//! Core types for the Ward workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers and the error taxonomy shared by every capability
//! crate: bounded copies, the block heap, checked sizing, and the
//! configuration validators.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::{ConfigError, CopyError, HandleError, SizeError};
pub use id::{Access, BlockId};
