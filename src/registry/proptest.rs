//! Property-Based Tests for the Histogram Registry
//!
//! # Test Properties
//!
//! 1. **Cumulative Buckets**: an observation bumps exactly the buckets `>= v`
//! 2. **Totals**: `count` is the number of observations, `sum` their sum
//! 3. **Top Bucket**: `+Inf` always equals `count`
//! 4. **Canonical Labels**: pair order never changes the addressed series
//! 5. **Stable Encoding**: re-encoding unchanged state is byte-identical

#![cfg(test)]

use proptest::prelude::*;

use super::{LabelSet, Registry};

// =============================================================================
// Property Strategies
// =============================================================================

/// Strictly ascending finite bounds, 1-12 of them.
fn bounds_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::btree_set(-10_000i32..10_000, 1..12)
        .prop_map(|set| set.into_iter().map(|b| b as f64 / 4.0).collect())
}

/// Values on a grid that includes exact bound hits.
fn value_strategy() -> impl Strategy<Value = f64> {
    (-12_000i32..12_000).prop_map(|v| v as f64 / 4.0)
}

/// Unique label keys with arbitrary printable values.
fn labels_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z][a-z0-9_]{0,6}", "[ -~]{0,8}", 0..5).prop_map(|map| {
        map.into_iter()
            .filter(|(k, _)| k != "le")
            .collect::<Vec<_>>()
    })
}

// =============================================================================
// Bucket Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: one observation bumps every bucket >= v by one and no other.
    #[test]
    fn prop_single_observation_is_cumulative(
        bounds in bounds_strategy(),
        warmup in prop::collection::vec(value_strategy(), 0..20),
        value in value_strategy(),
    ) {
        let registry = Registry::new();
        let h = registry.add("h", "", &bounds)?;
        for v in &warmup {
            h.observe(LabelSet::empty(), *v)?;
        }

        let before = h.snapshot(LabelSet::empty())?;
        h.observe(LabelSet::empty(), value)?;
        let after = h.snapshot(LabelSet::empty())?.expect("series exists after observe");

        for (idx, bucket) in after.buckets.iter().enumerate() {
            let prev = before.as_ref().map_or(0, |s| s.buckets[idx].cumulative_count);
            let expected = if bucket.upper_bound >= value { prev + 1 } else { prev };
            prop_assert_eq!(bucket.cumulative_count, expected, "bucket le={}", bucket.upper_bound);
        }
    }

    /// Property: count, sum and +Inf agree with the observed values.
    #[test]
    fn prop_totals_match_observations(
        bounds in bounds_strategy(),
        values in prop::collection::vec(value_strategy(), 1..100),
    ) {
        let registry = Registry::new();
        registry.add("h", "", &bounds)?;
        for v in &values {
            registry.observe("h", [("k", "v")], *v)?;
        }

        let snap = registry.snapshot("h", [("k", "v")])?.expect("series exists");
        prop_assert_eq!(snap.count, values.len() as u64);
        prop_assert_eq!(snap.inf_count(), snap.count);
        // quarter-step values sum exactly in f64
        prop_assert_eq!(snap.sum, values.iter().sum::<f64>());

        for pair in snap.buckets.windows(2) {
            prop_assert!(pair[0].cumulative_count <= pair[1].cumulative_count);
        }
        for bucket in &snap.buckets {
            let expected = values.iter().filter(|v| **v <= bucket.upper_bound).count() as u64;
            prop_assert_eq!(bucket.cumulative_count, expected);
        }
    }

    /// Property: reordering label pairs addresses the same series.
    #[test]
    fn prop_label_order_is_irrelevant(
        labels in labels_strategy(),
        value in value_strategy(),
    ) {
        let registry = Registry::new();
        registry.add("h", "", &[0.0, 100.0])?;

        let mut reversed = labels.clone();
        reversed.reverse();

        registry.observe("h", labels.clone(), value)?;
        registry.observe("h", reversed, value)?;

        let h = registry.histogram("h")?;
        prop_assert_eq!(h.series_count(), 1);
        let snap = h.snapshot(labels)?.expect("series exists");
        prop_assert_eq!(snap.count, 2);
    }

    /// Property: encoding twice without observations yields the same document.
    #[test]
    fn prop_encoding_is_stable(
        bounds in bounds_strategy(),
        observations in prop::collection::vec((labels_strategy(), value_strategy()), 0..20),
    ) {
        let registry = Registry::new();
        registry.add("h", "help text", &bounds)?;
        for (labels, value) in observations {
            registry.observe("h", labels, value)?;
        }

        prop_assert_eq!(registry.encode(), registry.encode());
    }
}
