//! Histogram Definitions
//!
//! The static shape of one named histogram and the bucket helpers used to
//! build it.

use std::sync::Arc;

use crate::error::{Error, Result};

/// Name, help text and finite bucket bounds of one histogram.
///
/// The `+Inf` bucket is implicit and never stored in `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramDefinition {
    name: String,
    help: String,
    bounds: Arc<[f64]>,
}

impl HistogramDefinition {
    /// Validate and build a definition.
    pub fn new(name: impl Into<String>, help: impl Into<String>, bounds: &[f64]) -> Result<Self> {
        let name = name.into();
        validate_metric_name(&name)?;
        validate_bounds(&name, bounds)?;

        Ok(Self {
            name,
            help: help.into(),
            bounds: Arc::from(bounds),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Finite upper bounds in ascending order.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Number of buckets including `+Inf`.
    pub fn bucket_count(&self) -> usize {
        self.bounds.len() + 1
    }

    /// Index of the first bucket whose upper bound is `>= value`.
    ///
    /// Every bucket from this index through `+Inf` counts the value. Returns
    /// `bounds().len()` (the `+Inf` bucket) when the value exceeds every bound.
    pub(crate) fn first_matching_bucket(&self, value: f64) -> usize {
        self.bounds.partition_point(|bound| *bound < value)
    }
}

/// Check a name against the exposition grammar `[a-zA-Z_:][a-zA-Z0-9_:]*`.
pub fn validate_metric_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidMetricName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("name is empty")),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_' || c == ':') => {
            return Err(invalid("must start with a letter, '_' or ':'"));
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':') {
        return Err(invalid("may only contain letters, digits, '_' and ':'"));
    }
    Ok(())
}

fn validate_bounds(name: &str, bounds: &[f64]) -> Result<()> {
    let invalid = |reason: String| Error::InvalidBucketConfiguration {
        name: name.to_string(),
        reason,
    };

    if bounds.is_empty() {
        return Err(invalid("at least one bucket bound is required".to_string()));
    }
    if let Some(bad) = bounds.iter().find(|b| !b.is_finite()) {
        return Err(invalid(format!("bound {} is not finite", bad)));
    }
    if let Some(pair) = bounds.windows(2).find(|w| w[0] >= w[1]) {
        return Err(invalid(format!(
            "bounds must be strictly ascending, found {} followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// `count` bounds starting at `start`, each `width` apart.
pub fn linear_buckets(start: f64, width: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + width * i as f64).collect()
}

/// `count` bounds starting at `start`, each `factor` times the previous one.
pub fn exponential_buckets(start: f64, factor: f64, count: usize) -> Vec<f64> {
    std::iter::successors(Some(start), |prev| Some(prev * factor))
        .take(count)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
