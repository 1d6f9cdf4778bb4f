//! Histogram Families
//!
//! A definition together with every series observed for it so far. The
//! public [`Histogram`] handle is a cheap clone of the shared family.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::definition::HistogramDefinition;
use super::labels::LabelSet;
use super::series::{Series, SeriesSnapshot};
use crate::error::{Error, Result};

struct HistogramFamily {
    definition: HistogramDefinition,
    /// Grows monotonically; series are never evicted
    series: DashMap<LabelSet, Arc<Series>>,
}

/// Handle to a registered histogram.
///
/// Cloning is cheap and every clone observes into the same series. Keep one
/// around to skip the registry's name lookup on hot paths.
#[derive(Clone)]
pub struct Histogram {
    family: Arc<HistogramFamily>,
}

impl Histogram {
    pub(crate) fn new(definition: HistogramDefinition) -> Self {
        Self {
            family: Arc::new(HistogramFamily {
                definition,
                series: DashMap::new(),
            }),
        }
    }

    pub fn definition(&self) -> &HistogramDefinition {
        &self.family.definition
    }

    pub fn name(&self) -> &str {
        self.family.definition.name()
    }

    /// Record `value` into the series for `labels`, creating it on first use.
    ///
    /// Label pairs are canonicalized, so their order does not matter.
    pub fn observe<I, K, V>(&self, labels: I, value: f64) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let labels = LabelSet::new(labels)?;
        self.observe_set(&labels, value)
    }

    /// Record `value` into the series for an already-canonical label set.
    pub fn observe_set(&self, labels: &LabelSet, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(Error::InvalidObservation {
                name: self.name().to_string(),
                reason: "value is NaN".to_string(),
            });
        }

        let first_bucket = self.family.definition.first_matching_bucket(value);
        self.series_for(labels).observe(first_bucket, value);
        Ok(())
    }

    /// Number of distinct label sets observed so far.
    pub fn series_count(&self) -> usize {
        self.family.series.len()
    }

    /// Snapshot of the series for `labels`, or `None` if never observed.
    pub fn snapshot<I, K, V>(&self, labels: I) -> Result<Option<SeriesSnapshot>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let labels = LabelSet::new(labels)?;
        let series = self.family.series.get(&labels).map(|s| Arc::clone(s.value()));
        Ok(series.map(|s| s.snapshot(&self.family.definition)))
    }

    /// Snapshots of every series, ordered by canonical label set.
    ///
    /// Each series is copied under its own lock; the set as a whole is not a
    /// single atomic cut across series.
    pub fn snapshots(&self) -> Vec<SeriesSnapshot> {
        let mut series: Vec<Arc<Series>> = self
            .family
            .series
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        series.sort_by(|a, b| a.labels().cmp(b.labels()));

        series
            .iter()
            .map(|s| s.snapshot(&self.family.definition))
            .collect()
    }

    fn series_for(&self, labels: &LabelSet) -> Arc<Series> {
        if let Some(series) = self.family.series.get(labels) {
            return Arc::clone(series.value());
        }

        let bucket_count = self.family.definition.bucket_count();
        let entry = self.family.series.entry(labels.clone()).or_insert_with(|| {
            debug!(histogram = %self.name(), labels = %labels, "created series");
            Arc::new(Series::new(labels.clone(), bucket_count))
        });
        Arc::clone(entry.value())
    }
}

impl fmt::Debug for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Histogram")
            .field("name", &self.name())
            .field("bounds", &self.definition().bounds())
            .field("series", &self.series_count())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
