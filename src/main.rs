//! histex
//!
//! Builds a histogram registry from a config file, replays observations from
//! newline-delimited JSON and prints the exposition document.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │   Config     │───▶│   Registry   │───▶│   Encoder    │───▶ stdout
//! │ (YAML/JSON)  │    │              │    │              │
//! └──────────────┘    └──────────────┘    └──────────────┘
//!                            ▲
//!                 observations (stdin / file)
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use histex::error::Result;
use histex::{ingest, Format, Registry, RegistryConfig};

// =============================================================================
// CLI Arguments
// =============================================================================

/// histex - Cumulative histogram registry and exposition encoder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Histogram definitions (YAML, or JSON with a .json extension)
    #[arg(long, env = "HISTEX_CONFIG")]
    config: PathBuf,

    /// Newline-delimited JSON observations (defaults to stdin)
    #[arg(long, env = "HISTEX_INPUT")]
    input: Option<PathBuf>,

    /// Exposition format (prometheus, openmetrics)
    #[arg(long, env = "HISTEX_FORMAT", default_value = "prometheus")]
    format: Format,

    /// Abort on the first invalid observation instead of skipping it
    #[arg(long, env = "HISTEX_STRICT")]
    strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = RegistryConfig::from_file(&args.config)?;
    let registry = Registry::from_config(&config)?;
    info!(
        histograms = registry.len(),
        format = %args.format,
        "registry ready"
    );

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let summary = ingest::ingest(&registry, reader, args.strict)?;
    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        "observations ingested"
    );

    let document = registry.encode_with(args.format);
    let mut stdout = io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries the exposition document
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .init();
    }
}
