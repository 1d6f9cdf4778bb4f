//! histex - Cumulative Histogram Registry
//!
//! An in-process registry for cumulative histograms with a plaintext
//! exposition encoder compatible with the Prometheus and OpenMetrics text
//! formats.
//!
//! # Architecture
//!
//! ```text
//! add ─────▶ Registry ─────▶ HistogramDefinition (name, help, bounds)
//! observe ──▶   │    ──────▶ Series per LabelSet (buckets, sum, count)
//! encode ◀──────┘    ◀────── Encoder (read-only snapshot per series)
//! ```
//!
//! # Example
//!
//! ```
//! use histex::Registry;
//!
//! let registry = Registry::new();
//! registry.add("my_hist", "some histogram metric", &[500.0, 1000.0, 2000.0])?;
//! registry.observe("my_hist", [("foo", "bar"), ("baz", "qux")], 1100.0)?;
//!
//! let document = registry.encode();
//! assert!(document.contains("my_hist_bucket{baz=\"qux\",foo=\"bar\",le=\"2000.0\"} 1"));
//! # Ok::<(), histex::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`config`] - Declarative histogram definitions (YAML/JSON)
//! - [`encoding`] - Text exposition encoder
//! - [`error`] - Error types
//! - [`ingest`] - Newline-delimited JSON observation input
//! - [`registry`] - Histogram registry, families and series

pub mod config;
pub mod encoding;
pub mod error;
pub mod ingest;
pub mod registry;

// Re-export commonly used types
pub use config::{BucketConfig, BucketGenerator, HistogramConfig, RegistryConfig};
pub use encoding::Format;
pub use error::{Error, Result};
pub use registry::{
    exponential_buckets, linear_buckets, Bucket, Histogram, HistogramDefinition, LabelSet,
    Registry, SeriesSnapshot,
};
