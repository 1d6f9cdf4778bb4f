//! Observation Ingest
//!
//! Feeds newline-delimited JSON observations into a registry:
//!
//! ```text
//! {"name": "my_hist", "labels": {"foo": "bar"}, "value": 1100}
//! {"name": "my_hist", "labels": [["baz", "qux"], ["foo", "bar"]], "value": 250.5}
//! ```

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::registry::Registry;

/// One observation record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    pub value: f64,
}

/// Labels as a JSON object or as a list of `[key, value]` pairs.
///
/// The pair form lets duplicate keys through so the registry can reject them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Labels {
    Map(BTreeMap<String, String>),
    Pairs(Vec<(String, String)>),
}

impl Default for Labels {
    fn default() -> Self {
        Labels::Pairs(Vec::new())
    }
}

impl Labels {
    pub fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            Labels::Map(map) => map.into_iter().collect(),
            Labels::Pairs(pairs) => pairs,
        }
    }
}

/// Parse one input line; blank lines yield `None`.
pub fn parse_observation(line: &str) -> Result<Option<Observation>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Outcome of an ingest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub accepted: u64,
    pub rejected: u64,
}

/// Read observations from `reader` and record them in `registry`.
///
/// With `strict`, the first malformed or rejected line aborts the run.
/// Otherwise the line is logged and skipped.
pub fn ingest<R: BufRead>(registry: &Registry, reader: R, strict: bool) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();

    // Raw lines, so a bad encoding is rejected per line rather than ending the read
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let line_no = idx + 1;
        let raw = raw?;

        let outcome = String::from_utf8(raw)
            .map_err(Error::from)
            .and_then(|line| parse_observation(&line))
            .and_then(|parsed| match parsed {
                Some(obs) => registry
                    .observe(&obs.name, obs.labels.into_pairs(), obs.value)
                    .map(|_| true),
                None => Ok(false),
            });

        match outcome {
            Ok(true) => summary.accepted += 1,
            Ok(false) => {}
            Err(e) if strict => {
                debug!(line = line_no, error = %e, "aborting ingest");
                return Err(e);
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping observation");
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}

// =============================================================================
// Tests
// =============================================================================
