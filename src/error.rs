//! Error types for the histogram registry

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while defining, observing or loading histograms
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Registry Errors
    // =========================================================================
    /// A histogram with this name is already registered
    #[error("Histogram '{name}' is already registered")]
    DuplicateMetricName { name: String },

    /// Metric name is empty or not valid in the exposition grammar
    #[error("Invalid metric name '{name}': {reason}")]
    InvalidMetricName { name: String, reason: String },

    /// Bucket bounds are empty, non-ascending or non-finite
    #[error("Invalid bucket configuration for '{name}': {reason}")]
    InvalidBucketConfiguration { name: String, reason: String },

    /// No histogram with this name has been registered
    #[error("Histogram '{name}' not found")]
    UnknownMetricName { name: String },

    /// Label pairs contain a duplicate, reserved or malformed key
    #[error("Invalid label set: {0}")]
    InvalidLabelSet(String),

    /// Observed value cannot be recorded
    #[error("Invalid observation for '{name}': {reason}")]
    InvalidObservation { name: String, reason: String },

    // =========================================================================
    // Configuration / Input Errors
    // =========================================================================
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input line is not valid UTF-8
    #[error("Invalid UTF-8 input: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Tests
// =============================================================================
