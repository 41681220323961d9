//! Deterministic benchmark inputs for the Ward crates.
//!
//! Every generator is seeded, so a benchmark sees identical inputs on
//! every run:
//!
//! - [`byte_sources`]: copy sources of varying length
//! - [`int_sequence`]: integer sequences for removal
//! - [`churn_ops`]: interleaved allocate/release operations

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` byte strings of length `0..=max_len`, filled with printable ASCII.
pub fn byte_sources(seed: u64, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = below(&mut rng, max_len + 1);
            (0..len).map(|_| b' ' + below(&mut rng, 95) as u8).collect()
        })
        .collect()
}

/// `len` integers in `-1000..1000`.
pub fn int_sequence(seed: u64, len: usize) -> Vec<i32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| below(&mut rng, 2000) as i32 - 1000).collect()
}

/// One step of a heap churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Allocate a block of this many bytes.
    Alloc(usize),
    /// Release the live block at this position (modulo the live count).
    Release(usize),
}

/// `n` churn operations, roughly 60% allocations, with block sizes up to
/// `max_block` bytes.
pub fn churn_ops(seed: u64, n: usize, max_block: usize) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            if below(&mut rng, 10) < 6 {
                ChurnOp::Alloc(below(&mut rng, max_block + 1))
            } else {
                ChurnOp::Release(below(&mut rng, usize::MAX))
            }
        })
        .collect()
}

// Modulo bias is irrelevant for benchmark inputs.
fn below(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    (rng.next_u64() % bound.max(1) as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_deterministic() {
        assert_eq!(byte_sources(7, 16, 32), byte_sources(7, 16, 32));
        assert_eq!(int_sequence(7, 64), int_sequence(7, 64));
        assert_eq!(churn_ops(7, 64, 128), churn_ops(7, 64, 128));
        assert_ne!(int_sequence(7, 64), int_sequence(8, 64));
    }

    #[test]
    fn generators_respect_bounds() {
        for src in byte_sources(1, 100, 24) {
            assert!(src.len() <= 24);
            assert!(src.iter().all(|b| (b' '..=b'~').contains(b)));
        }
        assert!(int_sequence(1, 500).iter().all(|v| (-1000..1000).contains(v)));
        for op in churn_ops(1, 500, 64) {
            if let ChurnOp::Alloc(len) = op {
                assert!(len <= 64);
            }
        }
    }
}
