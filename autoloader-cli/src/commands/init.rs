//! Init command - write a starter configuration file.

use std::path::Path;

use autoloader::{AutoloadConfig, NamespaceMapping};

use crate::error::CliError;

/// Starter configuration: the `app` namespace under `./src`.
pub fn starter_config() -> AutoloadConfig {
    AutoloadConfig::new().with_namespace(NamespaceMapping::new("app\\", "src"))
}

/// Run the init command.
pub fn run(config_path: &Path, force: bool) -> Result<(), CliError> {
    if config_path.exists() && !force {
        return Err(CliError::ConfigExists(config_path.to_path_buf()));
    }

    starter_config().save(config_path)?;

    println!("Configuration file: {}", config_path.display());
    println!();
    println!("Add one line per namespace under [namespaces], e.g.");
    println!("  blog\\ = src");
    println!("Prefix a directory with '+' to search it first.");
    Ok(())
}
