//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ThreatLens - heuristic threat analysis for logs and documents
#[derive(Parser, Debug)]
#[command(name = "threatlens")]
#[command(author, version, about, long_about = None)]
#[command(about = "ThreatLens - score log and document lines against a threat signature catalogue")]
pub struct Cli {
    /// Logging verbosity level
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LogLevel,

    /// Logging output format
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: crate::logging::LogFormat,

    /// Control color output (auto, always, never). Respects NO_COLOR env var.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze files (or stdin) for threat indicators
    Analyze {
        /// Files to analyze (reads from stdin if none given)
        files: Vec<PathBuf>,

        /// Output format: text, json (overrides the configured default)
        #[arg(short = 'F', long)]
        format: Option<OutputFormat>,

        /// Suppress stdout output, only set exit code
        #[arg(short, long)]
        quiet: bool,

        /// Skip the extension allowlist check
        #[arg(long)]
        no_extension_check: bool,
    },

    /// Inspect the threat signature catalogue
    Signatures {
        #[command(subcommand)]
        action: SignaturesAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SignaturesAction {
    /// List catalogue entries with severity and confidence window
    List,

    /// Show patterns, keywords, and indicators for one threat type
    Info {
        /// Threat type label, e.g. "Malware Detection"
        threat_type: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default configuration
    Init {
        /// Path to create config file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Show current configuration
    Show,
}

/// Logging verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Analyze exit codes with distinct semantics.
/// 0 = no reportable threats, 1 = threats found, 2 = error.
pub const EXIT_CLEAN: u8 = 0;
pub const EXIT_THREAT: u8 = 1;
pub const EXIT_ERROR: u8 = 2;
