//! Registry Configuration
//!
//! Declarative histogram definitions loaded from YAML or JSON.
//!
//! ```yaml
//! histograms:
//!   - name: http_request_duration_ms
//!     help: Request latency in milliseconds
//!     buckets: [5, 10, 25, 50, 100, 250, 500, 1000]
//!   - name: payload_bytes
//!     buckets:
//!       exponential: { start: 64, factor: 4, count: 6 }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::{exponential_buckets, linear_buckets};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegistryConfig {
    /// Histograms to register, in order
    #[serde(default)]
    pub histograms: Vec<HistogramConfig>,
}

/// One histogram definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistogramConfig {
    pub name: String,

    #[serde(default)]
    pub help: String,

    pub buckets: BucketConfig,
}

/// Bucket bounds, listed explicitly or generated
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BucketConfig {
    Explicit(Vec<f64>),
    Generated(BucketGenerator),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketGenerator {
    Linear { start: f64, width: f64, count: usize },
    Exponential { start: f64, factor: f64, count: usize },
}

impl BucketConfig {
    /// Resolve to concrete bounds. Validation happens when the histogram is added.
    pub fn bounds(&self) -> Vec<f64> {
        match self {
            BucketConfig::Explicit(bounds) => bounds.clone(),
            BucketConfig::Generated(BucketGenerator::Linear {
                start,
                width,
                count,
            }) => linear_buckets(*start, *width, *count),
            BucketConfig::Generated(BucketGenerator::Exponential {
                start,
                factor,
                count,
            }) => exponential_buckets(*start, *factor, *count),
        }
    }
}

impl RegistryConfig {
    /// Parse YAML configuration
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        serde_yaml::from_str(input)
            .map_err(|e| Error::Config(format!("Failed to parse YAML config: {}", e)))
    }

    /// Parse JSON configuration
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| Error::Config(format!("Failed to parse JSON config: {}", e)))
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };

        debug!(
            path = %path.display(),
            histograms = config.histograms.len(),
            "loaded registry config"
        );
        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_yaml_explicit_and_generated() {
        let config = RegistryConfig::from_yaml_str(
            r#"
histograms:
  - name: my_hist
    help: some histogram metric
    buckets: [500, 1000, 2000, 3000, 5000]
  - name: sizes
    buckets:
      exponential: { start: 1, factor: 2, count: 4 }
  - name: steps
    buckets:
      linear: { start: 0.5, width: 0.5, count: 3 }
"#,
        )
        .unwrap();

        assert_eq!(config.histograms.len(), 3);
        assert_eq!(config.histograms[0].help, "some histogram metric");
        assert_eq!(
            config.histograms[0].buckets.bounds(),
            vec![500.0, 1000.0, 2000.0, 3000.0, 5000.0]
        );
        assert_eq!(config.histograms[1].help, "");
        assert_eq!(
            config.histograms[1].buckets.bounds(),
            vec![1.0, 2.0, 4.0, 8.0]
        );
        assert_eq!(
            config.histograms[2].buckets.bounds(),
            vec![0.5, 1.0, 1.5]
        );
    }

    #[test]
    fn test_json_config() {
        let config = RegistryConfig::from_json_str(
            r#"{"histograms": [{"name": "h", "help": "x", "buckets": [1, 2.5]}]}"#,
        )
        .unwrap();
        assert_eq!(config.histograms[0].buckets.bounds(), vec![1.0, 2.5]);
    }

    #[test]
    fn test_empty_config() {
        let config = RegistryConfig::from_yaml_str("{}").unwrap();
        assert!(config.histograms.is_empty());
    }

    #[test]
    fn test_malformed_config() {
        assert_matches!(
            RegistryConfig::from_yaml_str("histograms: [{ name: h }]"),
            Err(Error::Config(_))
        );
        assert_matches!(
            RegistryConfig::from_json_str("{not json"),
            Err(Error::Config(_))
        );
    }

    #[test]
    fn test_missing_file() {
        assert_matches!(
            RegistryConfig::from_file("/nonexistent/histex.yaml"),
            Err(Error::Config(msg)) if msg.contains("/nonexistent/histex.yaml")
        );
    }
}
