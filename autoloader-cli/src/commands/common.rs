//! Common utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use autoloader::{AutoloadConfig, DEFAULT_CONFIG_FILE};
use tracing::debug;

use crate::error::CliError;

/// Resolve the config file path: CLI flag first, then `./autoload.ini`.
pub fn config_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the configuration, failing if the file is missing or invalid.
pub fn load_config(path: &Path) -> Result<AutoloadConfig, CliError> {
    let config = AutoloadConfig::load(path)?;
    debug!(path = %path.display(), "Using config");
    Ok(config)
}
