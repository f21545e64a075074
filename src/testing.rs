use itertools::Itertools;
use proptest::{collection::hash_set, prelude::*, sample::SizeRange};

/// Generates a shuffled collection of distinct values.
pub fn distinct_values(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<u64>> {
    hash_set(any::<u64>(), size)
        .prop_flat_map(|values| Just(values.into_iter().collect_vec()).prop_shuffle())
}

/// Generates a shuffled permutation of `0..n`.
pub fn permutation(n: u64) -> impl Strategy<Value = Vec<u64>> {
    Just((0..n).collect_vec()).prop_shuffle()
}
