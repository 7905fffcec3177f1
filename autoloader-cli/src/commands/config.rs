//! Configuration file CLI commands.

use std::path::Path;

use clap::Subcommand;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path in effect
    Path,
}

/// Run a config subcommand.
pub fn run(config_path: &Path, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(config_path),
    }
}

/// Show the configuration file path.
fn run_path(config_path: &Path) -> Result<(), CliError> {
    let shown = std::fs::canonicalize(config_path).unwrap_or_else(|_| config_path.to_path_buf());
    println!("{}", shown.display());
    if !config_path.exists() {
        println!("(file does not exist; run 'autoloader init' to create it)");
    }
    Ok(())
}
