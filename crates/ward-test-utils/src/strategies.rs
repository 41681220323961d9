//! Reusable `proptest` strategies.

use proptest::collection::vec;
use proptest::prelude::*;

/// A byte source up to `max_len` bytes long.
pub fn byte_source(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..=max_len)
}

/// A `(source, capacity)` pair covering fitting, boundary and
/// overflowing copies, including capacity 0.
pub fn source_and_capacity() -> impl Strategy<Value = (Vec<u8>, usize)> {
    (byte_source(64), 0usize..48)
}

/// An integer sequence with many adjacent duplicates and even runs.
pub fn int_sequence() -> impl Strategy<Value = Vec<i32>> {
    vec(-8i32..8, 0..64)
}

/// `(count, elem_size)` pairs straddling the `usize` overflow boundary.
pub fn size_operands() -> impl Strategy<Value = (usize, usize)> {
    prop_oneof![
        (0usize..4096, 0usize..4096),
        (any::<usize>(), 0usize..16),
        (any::<usize>(), any::<usize>()),
    ]
}

/// A sequence of heap operations: `true` allocates a block of the given
/// length, `false` releases the block at `index % live`.
pub fn heap_ops() -> impl Strategy<Value = Vec<(bool, usize)>> {
    vec((any::<bool>(), 0usize..64), 1..64)
}
