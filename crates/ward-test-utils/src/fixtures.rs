//! Canonical inputs for the classic bug scenarios.
//!
//! Each constant reproduces the input of one demonstration routine so
//! tests and benches exercise the same shapes.

/// Source copied into a 10-byte stack buffer by the overflowing copy.
pub const LONG_SOURCE: &[u8] = b"This is a very long string";

/// Destination capacity used by both overflowing copy scenarios.
pub const DEMO_CAPACITY: usize = 10;

/// Source copied into a 10-byte heap block by the leaking overflow.
pub const HEAP_OVERFLOW_SOURCE: &[u8] = b"AAAAAAAAAAAAA";

/// Block size and payload of the use-after-free scenario.
pub const UAF_BLOCK_LEN: usize = 20;
pub const UAF_PAYLOAD: &[u8] = b"abc";

/// Block size of the double-free scenario.
pub const DOUBLE_FREE_BLOCK_LEN: usize = 10;

/// Element size multiplied into a 32-bit length by the sizing scenario.
pub const SCALE_FACTOR: i32 = 1_000_000;

/// Smallest count for which `count * SCALE_FACTOR` wraps an `i32`.
pub const FIRST_WRAPPING_COUNT: i32 = 2148;

/// Sequence traversed by the remove-while-iterating scenario.
pub const SAMPLE_SEQUENCE: [i32; 5] = [1, 2, 3, 4, 5];

/// Per-task adjustment count of the counter race scenario.
pub const RACE_ITERATIONS: u64 = 100_000;

/// Predicate used by the removal scenarios.
pub fn is_even(v: &i32) -> bool {
    v % 2 == 0
}

/// Reference result for filtered removal: keep where `pred` is false.
pub fn expected_without<T: Clone>(items: &[T], pred: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|v| !pred(v)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_source_overflows_demo_capacity() {
        assert!(LONG_SOURCE.len() >= DEMO_CAPACITY);
        assert!(HEAP_OVERFLOW_SOURCE.len() >= DEMO_CAPACITY);
    }

    #[test]
    fn first_wrapping_count_is_the_boundary() {
        assert!((FIRST_WRAPPING_COUNT - 1).checked_mul(SCALE_FACTOR).is_some());
        assert!(FIRST_WRAPPING_COUNT.checked_mul(SCALE_FACTOR).is_none());
    }

    #[test]
    fn reference_removal_of_sample() {
        assert_eq!(expected_without(&SAMPLE_SEQUENCE, is_even), vec![1, 3, 5]);
    }
}
