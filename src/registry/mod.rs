//! Histogram Registry
//!
//! Cumulative histograms keyed by name and label set.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                             Registry                                  │
//! │              RwLock<name → Histogram> (write only on add)             │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │  Histogram (Arc<HistogramFamily>)                                     │
//! │  ┌────────────────────┐   ┌─────────────────────────────────────────┐ │
//! │  │ HistogramDefinition│   │ DashMap<LabelSet, Arc<Series>>          │ │
//! │  │ name, help, bounds │   │   Series: Mutex<{buckets, sum, count}>  │ │
//! │  └────────────────────┘   └─────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! - Observations on different series never share a lock beyond a DashMap shard
//!   during first-time series creation
//! - Each observation updates buckets, sum and count in one critical section
//! - Snapshots copy a series under that same lock, so `+Inf == count` always
//!
//! Series are never evicted. Every distinct label set observed stays in memory
//! for the registry's lifetime, so callers must keep label cardinality bounded.

mod definition;
mod family;
mod labels;
mod series;
mod store;

#[cfg(test)]
mod proptest;

pub use definition::{
    exponential_buckets, linear_buckets, validate_metric_name, HistogramDefinition,
};
pub use family::Histogram;
pub use labels::{LabelSet, BUCKET_LABEL};
pub use series::{Bucket, SeriesSnapshot};
pub use store::Registry;
