//! The removal strategies agree with the filtering reference.

use proptest::prelude::*;
use ward_seq::{extract_where, remove_where, without_matching};
use ward_test_utils::strategies::int_sequence;
use ward_test_utils::{expected_without, is_even, SAMPLE_SEQUENCE};

#[test]
fn sample_sequence_keeps_odds() {
    let mut v = SAMPLE_SEQUENCE.to_vec();
    remove_where(&mut v, is_even);
    assert_eq!(v, vec![1, 3, 5]);
    assert_eq!(without_matching(&SAMPLE_SEQUENCE, is_even), vec![1, 3, 5]);
}

proptest! {
    #[test]
    fn all_strategies_match_reference(items in int_sequence(), modulus in 1i32..5) {
        let pred = |v: &i32| v.rem_euclid(modulus) == 0;
        let expected = expected_without(&items, pred);

        prop_assert_eq!(&without_matching(&items, pred), &expected);

        let mut compacted = items.clone();
        let removed = remove_where(&mut compacted, pred);
        prop_assert_eq!(&compacted, &expected);
        prop_assert_eq!(removed, items.len() - expected.len());

        let mut partitioned = items.clone();
        let extracted = extract_where(&mut partitioned, pred);
        prop_assert_eq!(&partitioned, &expected);
        let expected_removed: Vec<i32> = items.iter().copied().filter(|v| pred(v)).collect();
        prop_assert_eq!(extracted, expected_removed);
    }

    #[test]
    fn removal_is_idempotent(items in int_sequence()) {
        let mut once = items.clone();
        remove_where(&mut once, is_even);
        let mut twice = once.clone();
        prop_assert_eq!(remove_where(&mut twice, is_even), 0);
        prop_assert_eq!(once, twice);
    }
}
