//! Structured logging setup.
//!
//! Analysis results belong on stdout; everything the tool says about
//! itself (timings, per-file progress, diagnostics) goes to stderr
//! through tracing so scripted callers can parse stdout cleanly.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable colored output
    Pretty,
    /// Structured JSON lines
    Json,
}

/// Errors from logging initialization.
#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("Failed to parse log filter: {0}")]
    Filter(String),

    #[error("Failed to set global subscriber: {0}")]
    SetGlobal(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Output goes to
/// stderr only.
pub fn init(level: Level, format: LogFormat) -> Result<(), LogInitError> {
    let filter = build_env_filter(level)?;

    let layer = match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LogInitError::SetGlobal(e.to_string()))
}

fn build_env_filter(level: Level) -> Result<EnvFilter, LogInitError> {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    EnvFilter::try_new(&directive).map_err(|e| LogInitError::Filter(e.to_string()))
}
