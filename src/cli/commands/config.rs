//! Config command: initialize and display ThreatLens configuration.

use anyhow::Context;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::args::ConfigAction;
use crate::config::settings::Config;

/// Execute the `config` subcommand (init, show).
pub fn cmd_config(action: ConfigAction) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Init { path } => init_config(path.unwrap_or_else(Config::default_config_path)),
        ConfigAction::Show => show_config(),
    }
}

fn init_config(config_path: PathBuf) -> anyhow::Result<ExitCode> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, render(&Config::default())?).with_context(|| {
        format!("Failed to write config file '{}'", config_path.display())
    })?;

    debug!(path = %config_path.display(), "Config file created");
    println!("Created config at: {}", config_path.display());
    Ok(ExitCode::SUCCESS)
}

/// Prints the effective configuration: the file parsed with missing
/// fields filled from defaults, or the built-in defaults when no file
/// exists.
fn show_config() -> anyhow::Result<ExitCode> {
    let config_path = Config::default_config_path();

    let config = if config_path.exists() {
        println!("# {}", config_path.display());
        Config::from_file(&config_path).with_context(|| {
            format!("Failed to load config file '{}'", config_path.display())
        })?
    } else {
        println!("# No config file at {} (built-in defaults)", config_path.display());
        Config::default()
    };

    print!("{}", render(&config)?);
    Ok(ExitCode::SUCCESS)
}

fn render(config: &Config) -> anyhow::Result<String> {
    config.to_toml().context("Failed to serialize config")
}
