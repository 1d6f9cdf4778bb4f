//! Histogram Registry
//!
//! Owns every registered histogram and exposes the add/observe/encode API.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::info;

use super::definition::HistogramDefinition;
use super::family::Histogram;
use super::series::SeriesSnapshot;
use crate::config::RegistryConfig;
use crate::encoding::{self, Format};
use crate::error::{Error, Result};

#[derive(Default)]
struct Families {
    /// Registration order, used for encoding
    ordered: Vec<Histogram>,
    by_name: HashMap<String, Histogram>,
}

/// Registry of histogram families.
///
/// Share it behind an `Arc` between the threads that observe and the one that
/// encodes. The family table is guarded by a read/write lock taken for writing
/// only by [`Registry::add`]; observations contend only on the series they
/// touch.
#[derive(Default)]
pub struct Registry {
    families: RwLock<Families>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every histogram in `config` installed.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let registry = Self::new();
        for histogram in &config.histograms {
            registry.add(&histogram.name, &histogram.help, &histogram.buckets.bounds())?;
        }
        Ok(registry)
    }

    /// Register a histogram.
    ///
    /// Fails with [`Error::DuplicateMetricName`] if `name` is taken, leaving the
    /// existing histogram untouched, and with a validation error if the name or
    /// bounds are malformed. Nothing is installed on failure.
    pub fn add(&self, name: &str, help: &str, bounds: &[f64]) -> Result<Histogram> {
        let definition = HistogramDefinition::new(name, help, bounds)?;

        let mut families = self.families.write();
        if families.by_name.contains_key(name) {
            return Err(Error::DuplicateMetricName {
                name: name.to_string(),
            });
        }

        let histogram = Histogram::new(definition);
        families.ordered.push(histogram.clone());
        families
            .by_name
            .insert(name.to_string(), histogram.clone());

        info!(histogram = %name, buckets = bounds.len(), "registered histogram");
        Ok(histogram)
    }

    /// Look up the handle for a registered histogram.
    pub fn histogram(&self, name: &str) -> Result<Histogram> {
        self.families
            .read()
            .by_name
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMetricName {
                name: name.to_string(),
            })
    }

    /// Record one observation.
    pub fn observe<I, K, V>(&self, name: &str, labels: I, value: f64) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.histogram(name)?.observe(labels, value)
    }

    /// Snapshot of one series, `None` if that label set was never observed.
    pub fn snapshot<I, K, V>(&self, name: &str, labels: I) -> Result<Option<SeriesSnapshot>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.histogram(name)?.snapshot(labels)
    }

    /// Names of all registered histograms, in registration order.
    pub fn histogram_names(&self) -> Vec<String> {
        self.families
            .read()
            .ordered
            .iter()
            .map(|h| h.name().to_string())
            .collect()
    }

    /// Handles for all registered histograms, in registration order.
    pub fn histograms(&self) -> Vec<Histogram> {
        self.families.read().ordered.clone()
    }

    pub fn len(&self) -> usize {
        self.families.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode all histograms in the Prometheus text format.
    pub fn encode(&self) -> String {
        self.encode_with(Format::Prometheus)
    }

    /// Encode all histograms in the given format.
    pub fn encode_with(&self, format: Format) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.encode_to(&mut out, format);
        out
    }

    /// Encode all histograms into any text sink.
    pub fn encode_to<W: fmt::Write>(&self, out: &mut W, format: Format) -> fmt::Result {
        encoding::encode(out, &self.histograms(), format)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("histograms", &self.histogram_names())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
