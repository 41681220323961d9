//! Test utilities for Ward development.
//!
//! Provides the canonical scenario inputs ([`fixtures`]) and reusable
//! `proptest` strategies ([`strategies`]) shared by the unit,
//! integration, and benchmark suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::*;
