#![cfg(feature = "promise")]
//! Property-based tests for promise streams.
//!
//! - **Map identity / composition**, observed through `take_p`
//! - **Filter correctness**
//! - **Zip pairing**
//! - **Rejection propagation** through derived streams

use lazy_streams::control::Thunk;
use lazy_streams::promise::{
    Promise, PromiseStream, StreamCell, filter_p, from_array_p, map_p, take_p, zip_p,
};
use proptest::prelude::*;

type Stream = PromiseStream<i32, String>;

fn collect(count: usize, stream: Stream) -> Option<Result<Vec<i32>, String>> {
    take_p(count, stream).peek()
}

// =============================================================================
// Map Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_map_identity(items in prop::collection::vec(any::<i32>(), 0..48)) {
        let length = items.len();
        let mapped = map_p(|value| value, from_array_p(items.clone()));
        prop_assert_eq!(collect(length, mapped), Some(Ok(items)));
    }

    #[test]
    fn prop_map_composition(items in prop::collection::vec(any::<i32>(), 0..48)) {
        let function1 = |n: i32| n.wrapping_add(11);
        let function2 = |n: i32| n.wrapping_mul(5);
        let length = items.len();

        let left = map_p(function2, map_p(function1, from_array_p(items.clone())));
        let right = map_p(move |x| function2(function1(x)), from_array_p(items));

        prop_assert_eq!(collect(length, left), collect(length, right));
    }
}

// =============================================================================
// Filter and Zip
// =============================================================================

proptest! {
    #[test]
    fn prop_filter_is_matching_subsequence(items in prop::collection::vec(any::<i32>(), 0..48)) {
        let expected: Vec<i32> = items.iter().copied().filter(|value| value % 3 == 0).collect();
        let filtered = filter_p(|value: &i32| value % 3 == 0, from_array_p(items));
        prop_assert_eq!(collect(expected.len(), filtered), Some(Ok(expected)));
    }

    #[test]
    fn prop_filter_stays_pending_past_last_match(items in prop::collection::vec(any::<i32>(), 0..48)) {
        let matches = items.iter().filter(|value| **value >= 0).count();
        let filtered: Stream = filter_p(|value: &i32| *value >= 0, from_array_p(items));
        prop_assert!(take_p(matches + 1, filtered).is_pending());
    }

    #[test]
    fn prop_zip_pairs_positionally(
        left in prop::collection::vec(any::<i32>(), 0..32),
        right in prop::collection::vec(any::<i32>(), 0..32),
    ) {
        let expected: Vec<i32> = left
            .iter()
            .zip(right.iter())
            .map(|(a, b)| a.wrapping_sub(*b))
            .collect();
        let zipped = zip_p(|a: i32, b: i32| a.wrapping_sub(b), from_array_p(left), from_array_p(right));
        prop_assert_eq!(collect(expected.len(), zipped), Some(Ok(expected)));
    }
}

// =============================================================================
// Rejection
// =============================================================================

proptest! {
    #[test]
    fn prop_rejection_after_prefix_reaches_consumer(
        prefix in prop::collection::vec(any::<i32>(), 0..16),
        reason in "[a-z]{1,8}",
    ) {
        let failing: Stream = Promise::rejected(reason.clone());
        let stream = prefix.iter().rev().fold(failing, |rest, value| {
            Promise::resolved(StreamCell { value: *value, rest: Thunk::ready(rest) })
        });

        let derived = map_p(|value: i32| value.wrapping_neg(), filter_p(|_: &i32| true, stream));
        prop_assert_eq!(collect(prefix.len() + 1, derived), Some(Err(reason)));
    }
}
