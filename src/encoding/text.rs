//! Text Exposition Encoder
//!
//! Produces the Prometheus text format (0.0.4) or its OpenMetrics variant.
//! Both share the sample grammar:
//!
//! ```text
//! # HELP my_hist some histogram metric
//! # TYPE my_hist histogram
//! my_hist_bucket{foo="bar",le="500.0"} 0
//! my_hist_bucket{foo="bar",le="+Inf"} 1
//! my_hist_sum{foo="bar"} 1100.0
//! my_hist_count{foo="bar"} 1.0
//! ```
//!
//! Families appear in registration order, series in canonical label order and
//! labels in key order with `le` last, so unchanged state always encodes to the
//! same bytes.

use std::borrow::Cow;
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::Error;
use crate::registry::{Histogram, LabelSet, SeriesSnapshot, BUCKET_LABEL};

/// Exposition flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Prometheus plain text, version 0.0.4
    #[default]
    Prometheus,
    /// OpenMetrics text, terminated by `# EOF`
    OpenMetrics,
}

impl Format {
    /// HTTP `Content-Type` for documents in this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Prometheus => "text/plain; version=0.0.4; charset=utf-8",
            Format::OpenMetrics => "application/openmetrics-text; version=1.0.0; charset=utf-8",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Prometheus => write!(f, "prometheus"),
            Format::OpenMetrics => write!(f, "openmetrics"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prometheus" | "text" => Ok(Format::Prometheus),
            "openmetrics" => Ok(Format::OpenMetrics),
            other => Err(Error::Config(format!(
                "unknown exposition format '{}', expected 'prometheus' or 'openmetrics'",
                other
            ))),
        }
    }
}

/// Encode every histogram into `out`.
pub fn encode<W: Write>(out: &mut W, histograms: &[Histogram], format: Format) -> fmt::Result {
    for histogram in histograms {
        encode_histogram(out, histogram, format)?;
    }
    if format == Format::OpenMetrics {
        out.write_str("# EOF\n")?;
    }
    Ok(())
}

fn encode_histogram<W: Write>(out: &mut W, histogram: &Histogram, format: Format) -> fmt::Result {
    let definition = histogram.definition();
    let name = definition.name();

    writeln!(
        out,
        "# HELP {} {}",
        name,
        escape_help(definition.help(), format)
    )?;
    writeln!(out, "# TYPE {} histogram", name)?;

    for series in histogram.snapshots() {
        encode_series(out, name, &series)?;
    }
    Ok(())
}

fn encode_series<W: Write>(out: &mut W, name: &str, series: &SeriesSnapshot) -> fmt::Result {
    for bucket in &series.buckets {
        let le = format_float(bucket.upper_bound);
        write!(out, "{}_bucket", name)?;
        write_labels(out, &series.labels, Some(&le))?;
        writeln!(out, " {}", bucket.cumulative_count)?;
    }

    write!(out, "{}_sum", name)?;
    write_labels(out, &series.labels, None)?;
    writeln!(out, " {}", format_float(series.sum))?;

    write!(out, "{}_count", name)?;
    write_labels(out, &series.labels, None)?;
    writeln!(out, " {}", format_float(series.count as f64))
}

fn write_labels<W: Write>(out: &mut W, labels: &LabelSet, le: Option<&str>) -> fmt::Result {
    if labels.is_empty() && le.is_none() {
        return Ok(());
    }

    out.write_char('{')?;
    let mut first = true;
    for (key, value) in labels.iter().chain(le.map(|le| (BUCKET_LABEL, le))) {
        if !first {
            out.write_char(',')?;
        }
        first = false;
        write!(out, "{}=\"{}\"", key, escape_label_value(value))?;
    }
    out.write_char('}')
}

/// Canonical decimal rendering shared by bounds, sums and counts.
///
/// Integral values keep a `.0` (`500` → `500.0`); others use the shortest
/// representation that round-trips, which switches to exponent notation for
/// very large or small magnitudes.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{:?}", value)
    }
}

/// Escape `\`, `"` and newline in a label value.
pub fn escape_label_value(value: &str) -> Cow<'_, str> {
    if !value.contains(&['\\', '"', '\n'][..]) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn escape_help(help: &str, format: Format) -> Cow<'_, str> {
    let quote = format == Format::OpenMetrics;
    if !help.contains(&['\\', '\n'][..]) && !(quote && help.contains('"')) {
        return Cow::Borrowed(help);
    }

    let mut escaped = String::with_capacity(help.len() + 4);
    for c in help.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '"' if quote => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

// =============================================================================
// Tests
// =============================================================================
