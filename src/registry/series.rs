//! Histogram Series
//!
//! Counters for one (histogram, label set) pair.

use parking_lot::Mutex;

use super::definition::HistogramDefinition;
use super::labels::LabelSet;

/// One bucket of a series snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Inclusive upper bound; `f64::INFINITY` for the implicit top bucket
    pub upper_bound: f64,
    /// Observations `<= upper_bound`
    pub cumulative_count: u64,
}

/// Point-in-time copy of one series, taken under its lock
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    pub labels: LabelSet,
    /// Ascending by bound, ending with `+Inf`
    pub buckets: Vec<Bucket>,
    pub sum: f64,
    pub count: u64,
}

impl SeriesSnapshot {
    /// Cumulative count for the bucket with exactly this upper bound.
    pub fn bucket(&self, upper_bound: f64) -> Option<u64> {
        self.buckets
            .iter()
            .find(|b| b.upper_bound == upper_bound)
            .map(|b| b.cumulative_count)
    }

    /// Count of the `+Inf` bucket.
    pub fn inf_count(&self) -> u64 {
        self.buckets.last().map_or(0, |b| b.cumulative_count)
    }
}

#[derive(Debug)]
struct SeriesState {
    /// Cumulative, one slot per finite bound plus `+Inf`
    bucket_counts: Vec<u64>,
    sum: f64,
    count: u64,
}

/// Mutable counters for one label set.
///
/// All counters sit behind a single mutex so an observation is applied, and a
/// snapshot is read, as one unit: `bucket_counts[+Inf] == count` always holds
/// for any reader.
#[derive(Debug)]
pub(crate) struct Series {
    labels: LabelSet,
    state: Mutex<SeriesState>,
}

impl Series {
    pub(crate) fn new(labels: LabelSet, bucket_count: usize) -> Self {
        Self {
            labels,
            state: Mutex::new(SeriesState {
                bucket_counts: vec![0; bucket_count],
                sum: 0.0,
                count: 0,
            }),
        }
    }

    pub(crate) fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Record one value. `first_bucket` comes from
    /// [`HistogramDefinition::first_matching_bucket`].
    pub(crate) fn observe(&self, first_bucket: usize, value: f64) {
        let mut state = self.state.lock();
        for count in &mut state.bucket_counts[first_bucket..] {
            *count += 1;
        }
        state.sum += value;
        state.count += 1;
    }

    pub(crate) fn snapshot(&self, definition: &HistogramDefinition) -> SeriesSnapshot {
        let (bucket_counts, sum, count) = {
            let state = self.state.lock();
            (state.bucket_counts.clone(), state.sum, state.count)
        };

        let buckets = definition
            .bounds()
            .iter()
            .copied()
            .chain(std::iter::once(f64::INFINITY))
            .zip(bucket_counts)
            .map(|(upper_bound, cumulative_count)| Bucket {
                upper_bound,
                cumulative_count,
            })
            .collect();

        SeriesSnapshot {
            labels: self.labels.clone(),
            buckets,
            sum,
            count,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
