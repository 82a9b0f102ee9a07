//! Signatures command: inspect the built-in catalogue.

use colored::*;
use std::process::ExitCode;
use tracing::debug;

use crate::analysis::signature::catalogue;
use crate::cli::args::{SignaturesAction, EXIT_ERROR};

/// Execute the `signatures` subcommand (list, info).
pub fn cmd_signatures(action: SignaturesAction) -> anyhow::Result<ExitCode> {
    match action {
        SignaturesAction::List => {
            println!("{} catalogue entries (priority order):", catalogue().len());
            println!();
            for sig in catalogue() {
                let (lo, hi) = sig.base_confidence;
                println!(
                    "  {:<32} {:<10} confidence {:.0}-{:.0}, {} patterns, {} keywords",
                    sig.threat_type.bold(),
                    sig.base_severity.to_string(),
                    lo,
                    hi,
                    sig.patterns.len(),
                    sig.keywords.len()
                );
            }
            debug!(count = catalogue().len(), "Catalogue listed");
            Ok(ExitCode::SUCCESS)
        }
        SignaturesAction::Info { threat_type } => {
            let wanted = threat_type.to_lowercase();
            let Some(sig) = catalogue()
                .iter()
                .find(|s| s.threat_type.to_lowercase() == wanted)
            else {
                eprintln!(
                    "{}: no signature named '{}'. Try 'threatlens signatures list'.",
                    "Error".red().bold(),
                    threat_type
                );
                return Ok(ExitCode::from(EXIT_ERROR));
            };

            println!("{}", sig.threat_type.bold());
            println!("  severity:   {}", sig.base_severity);
            println!(
                "  confidence: {:.0}-{:.0}",
                sig.base_confidence.0, sig.base_confidence.1
            );
            println!("  patterns:");
            for pattern in &sig.patterns {
                println!("    {}", pattern.as_str());
            }
            println!("  keywords:   {}", sig.keywords.join(", "));
            if sig.critical_indicators.is_empty() {
                println!("  indicators: (none)");
            } else {
                println!("  indicators: {}", sig.critical_indicators.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
