//! Map command - show the namespace registry.

use std::path::Path;

use autoloader::{LoadError, Registry};

use super::common::load_config;
use crate::error::CliError;

/// Run the map command.
pub fn run(config_path: &Path, json: bool) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let autoloader = config.build(|_: &Path| -> Result<(), LoadError> { Ok(()) });

    if json {
        println!("{}", serde_json::to_string_pretty(autoloader.registry())?);
    } else {
        print!("{}", render(autoloader.registry(), autoloader.extension()));
    }
    Ok(())
}

/// Render the registry as an indented listing, directories in search order.
pub fn render(registry: &Registry, extension: &str) -> String {
    let mut out = String::new();

    if registry.is_empty() {
        out.push_str("No namespaces registered.\n");
        return out;
    }

    out.push_str(&format!("Namespaces ({} extension)\n", extension));
    for (prefix, dirs) in registry.iter() {
        out.push_str(&format!("{}\n", prefix));
        for (i, dir) in dirs.iter().enumerate() {
            let marker = if Path::new(dir.as_str()).is_dir() { "" } else { "  (missing)" };
            out.push_str(&format!("  {}. {}{}\n", i + 1, dir, marker));
        }
    }
    out
}
