//! CLI error types.

use std::path::PathBuf;

use autoloader::{ConfigError, ResolveError};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Resolution failed while loading a mapped file.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Output could not be serialized.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// The class maps to no file.
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// Refused to overwrite an existing config file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    ConfigExists(PathBuf),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// A class that maps to nothing exits with 1 so scripts can tell it
    /// apart from real failures (2).
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ClassNotFound(_) => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::ClassNotFound("a\\B".to_string()).exit_code(), 1);
        assert_eq!(
            CliError::ConfigExists(PathBuf::from("autoload.ini")).exit_code(),
            2
        );
    }

    #[test]
    fn test_display() {
        let err = CliError::ClassNotFound("blog\\Home".to_string());
        assert_eq!(err.to_string(), "class not found: blog\\Home");

        let err = CliError::ConfigExists(PathBuf::from("autoload.ini"));
        assert!(err.to_string().contains("--force"));
    }
}
