#![cfg(feature = "pull")]
//! Property-based tests for continuation-pull streams.
//!
//! - **Single delivery**: a finite source of length n delivers n values, then one end
//! - **Map identity / composition**
//! - **Filter correctness**: the result is the matching subsequence, in order
//! - **Zip short-circuit**: the result is as long as the shorter input

use lazy_streams::pull::{PullStream, filter_s, from_array_s, map_s, take_s, zip_s};
use proptest::prelude::*;
use std::cell::Cell;

/// Steps `stream` to exhaustion by re-invoking each rest, counting deliveries.
fn count_deliveries(stream: &PullStream<i32>) -> (usize, usize) {
    let values = Cell::new(0);
    let ends = Cell::new(0);
    let mut current = Some(stream.clone());
    while let Some(stream) = current.take() {
        stream.step(
            |_, rest| {
                values.set(values.get() + 1);
                current = Some(rest);
            },
            || ends.set(ends.get() + 1),
        );
    }
    (values.get(), ends.get())
}

// =============================================================================
// Single Delivery
// =============================================================================

proptest! {
    #[test]
    fn prop_single_delivery(items in prop::collection::vec(any::<i32>(), 0..64)) {
        let length = items.len();
        prop_assert_eq!(count_deliveries(&from_array_s(items)), (length, 1));
    }

    #[test]
    fn prop_single_delivery_through_combinators(items in prop::collection::vec(any::<i32>(), 0..64)) {
        let expected = items.iter().filter(|value| **value > 0).count();
        let stream = map_s(|value: i32| value / 2, filter_s(|value: &i32| *value > 0, from_array_s(items)));
        prop_assert_eq!(count_deliveries(&stream), (expected, 1));
    }
}

// =============================================================================
// Map Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_map_identity(items in prop::collection::vec(any::<i32>(), 0..64)) {
        let mapped = map_s(|value| value, from_array_s(items.clone()));
        prop_assert_eq!(mapped.to_vec(), items);
    }

    #[test]
    fn prop_map_composition(items in prop::collection::vec(any::<i32>(), 0..64)) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);

        let left = map_s(function2, map_s(function1, from_array_s(items.clone())));
        let right = map_s(move |x| function2(function1(x)), from_array_s(items));

        prop_assert_eq!(left.to_vec(), right.to_vec());
    }
}

// =============================================================================
// Filter and Zip
// =============================================================================

proptest! {
    #[test]
    fn prop_filter_is_matching_subsequence(
        items in prop::collection::vec(any::<i32>(), 0..64),
        divisor in 1i32..5,
    ) {
        let expected: Vec<i32> = items.iter().copied().filter(|value| value % divisor == 0).collect();
        let filtered = filter_s(move |value: &i32| value % divisor == 0, from_array_s(items));
        prop_assert_eq!(filtered.to_vec(), expected);
    }

    #[test]
    fn prop_zip_length_is_shorter_input(
        left in prop::collection::vec(any::<i32>(), 0..32),
        right in prop::collection::vec(any::<i32>(), 0..32),
    ) {
        let expected: Vec<(i32, i32)> = left.iter().copied().zip(right.iter().copied()).collect();
        let zipped = zip_s(|a, b| (a, b), from_array_s(left), from_array_s(right));
        prop_assert_eq!(zipped.to_vec(), expected);
    }

    #[test]
    fn prop_take_is_prefix(items in prop::collection::vec(any::<i32>(), 0..32), count in 0usize..40) {
        let expected: Vec<i32> = items.iter().copied().take(count).collect();
        prop_assert_eq!(take_s(count, from_array_s(items)).to_vec(), expected);
    }
}
