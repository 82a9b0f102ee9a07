use clap::Parser;
use colored::*;
use std::process::ExitCode;
use threatlens::cli::args::{Cli, ColorMode, Commands};
use threatlens::cli::commands::{cmd_analyze, cmd_config, cmd_signatures};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    // Initialize structured logging before any command runs.
    // log_level/log_format are consumed here; only command is forwarded.
    if let Err(e) = threatlens::logging::init(cli.log_level.into(), cli.log_format) {
        eprintln!("{}: Failed to initialize logging: {}", "Error".red().bold(), e);
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(threatlens::cli::args::EXIT_ERROR)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Analyze {
            files,
            format,
            quiet,
            no_extension_check,
        } => cmd_analyze(&files, format, quiet, no_extension_check),
        Commands::Signatures { action } => cmd_signatures(action),
        Commands::Config { action } => cmd_config(action),
    }
}
