//! Analyze command: batch threat analysis over files or stdin.

use anyhow::Context;
use colored::*;
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::analysis::threat::ThreatRecord;
use crate::analysis::{Severity, ThreatAnalyzer};
use crate::cli::args::{OutputFormat, EXIT_CLEAN, EXIT_THREAT};
use crate::config::settings::{AnalysisConfig, Config, OutputConfig};

/// Per-file analysis outcome.
///
/// A file that cannot be read (missing, oversized, wrong type, not
/// UTF-8) still gets an entry here with an explicit error and zero
/// threats; it never aborts the rest of the batch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_name: String,
    pub file_size: u64,
    /// Lowercased extension including the dot, or empty.
    pub file_type: String,
    pub threats_found: usize,
    pub total_entries: usize,
    pub threats: Vec<ThreatRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn unreadable(path: &Path, size: u64, message: String) -> Self {
        Self {
            file_name: display_name(path),
            file_size: size,
            file_type: file_type_of(path),
            threats_found: 0,
            total_entries: 0,
            threats: Vec::new(),
            error: Some(message),
        }
    }
}

/// Execute the `analyze` subcommand.
pub fn cmd_analyze(
    files: &[PathBuf],
    format: Option<OutputFormat>,
    quiet: bool,
    no_extension_check: bool,
) -> anyhow::Result<ExitCode> {
    let config = Config::from_file(&Config::default_config_path()).unwrap_or_default();
    let format = resolve_format(format, &config.output);
    let analyzer = ThreatAnalyzer::new();

    let start = Instant::now();
    let reports = if files.is_empty() {
        vec![analyze_stdin(&analyzer)?]
    } else {
        files
            .iter()
            .map(|path| analyze_file(&analyzer, &config.analysis, path, no_extension_check))
            .collect()
    };
    info!(
        file_count = reports.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Batch analysis complete"
    );

    if !quiet {
        match format {
            OutputFormat::Text => print_text(&reports),
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "success": true,
                    "results": reports,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
    }

    let any_threats = reports.iter().any(|r| r.threats_found > 0);
    Ok(ExitCode::from(if any_threats { EXIT_THREAT } else { EXIT_CLEAN }))
}

/// The `--format` flag wins when given; otherwise the configured
/// default applies. Unrecognized config values degrade to text.
fn resolve_format(flag: Option<OutputFormat>, output: &OutputConfig) -> OutputFormat {
    if let Some(format) = flag {
        return format;
    }
    match output.format.as_str() {
        "json" => OutputFormat::Json,
        "text" => OutputFormat::Text,
        other => {
            warn!(format = other, "Unknown output format in config, using text");
            OutputFormat::Text
        }
    }
}

fn analyze_stdin(analyzer: &ThreatAnalyzer) -> anyhow::Result<FileReport> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
    debug!(content_bytes = content.len(), "Content read from stdin");

    let report = analyzer.analyze(&content);
    Ok(FileReport {
        file_name: "<stdin>".to_string(),
        file_size: content.len() as u64,
        file_type: String::new(),
        threats_found: report.threats_found,
        total_entries: report.total_entries,
        threats: report.threats,
        error: None,
    })
}

fn analyze_file(
    analyzer: &ThreatAnalyzer,
    limits: &AnalysisConfig,
    path: &Path,
    no_extension_check: bool,
) -> FileReport {
    if !no_extension_check && !limits.is_allowed_extension(path) {
        warn!(file = %path.display(), "Rejected by extension allowlist");
        return FileReport::unreadable(
            path,
            0,
            format!(
                "File type not supported. Allowed types: {}",
                limits.allowed_extensions.join(", ")
            ),
        );
    }

    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Unreadable file");
            return FileReport::unreadable(path, 0, format!("Failed to process file: {}", e));
        }
    };

    if size > limits.max_file_size_bytes() {
        warn!(file = %path.display(), size, "File exceeds size ceiling");
        return FileReport::unreadable(
            path,
            size,
            format!(
                "File exceeds the {} MB size limit",
                limits.max_file_size_mb
            ),
        );
    }

    // UTF-8 decode failure lands here too: garbled binary content must
    // surface as a file-level error, never flow into the engine.
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Unreadable file");
            return FileReport::unreadable(path, size, format!("Failed to process file: {}", e));
        }
    };

    let report = analyzer.analyze(&content);
    debug!(
        file = %path.display(),
        total_entries = report.total_entries,
        threats_found = report.threats_found,
        "File analyzed"
    );

    FileReport {
        file_name: display_name(path),
        file_size: size,
        file_type: file_type_of(path),
        threats_found: report.threats_found,
        total_entries: report.total_entries,
        threats: report.threats,
        error: None,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_type_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => "Critical".red().bold(),
        Severity::High => "High".red(),
        Severity::Medium => "Medium".yellow(),
        Severity::Low => "Low".green(),
    }
}

fn print_text(reports: &[FileReport]) {
    for report in reports {
        println!("{}", report.file_name.bold());

        if let Some(error) = &report.error {
            println!("  {} {}", "error:".red().bold(), error);
            println!();
            continue;
        }

        if report.total_entries == 0 {
            println!("  (empty document)");
            println!();
            continue;
        }

        for threat in &report.threats {
            println!(
                "  {} [{}] {}% {} <- {}",
                threat.id.dimmed(),
                severity_label(threat.severity),
                threat.confidence,
                threat.threat_type,
                threat.source
            );
        }

        let summary = format!(
            "{} entries, {} reportable threats",
            report.total_entries, report.threats_found
        );
        if report.threats_found > 0 {
            println!("  {} {}", "!".red().bold(), summary);
        } else {
            println!("  {} {}", "ok".green(), summary);
        }
        println!();
    }
}
