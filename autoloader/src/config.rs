//! INI configuration for building an [`Autoloader`].
//!
//! # Format
//!
//! ```ini
//! [autoload]
//! extension = .php
//! strict_permissions = false
//!
//! [namespaces]
//! blog\ = src
//! blog\ = vendor/blog
//! app\Http = +app/http
//! ```
//!
//! Each line of `[namespaces]` maps a prefix to one base directory. A
//! repeated prefix adds another directory after the earlier ones; a value
//! starting with `+` is prepended instead. Relative directories are taken
//! relative to the directory holding the config file.
//!
//! Backslash escapes and quoting are disabled when parsing, so namespace
//! keys are read literally. A key ending in `\` still needs whitespace
//! before the `=` (`blog\ = src`, not `blog\=src`): the INI reader treats
//! `\=` as part of the key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use thiserror::Error;
use tracing::debug;

use crate::loader::SourceLoader;
use crate::namespace::DEFAULT_EXTENSION;
use crate::resolver::Autoloader;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "autoload.ini";

const AUTOLOAD_SECTION: &str = "autoload";
const NAMESPACES_SECTION: &str = "namespaces";
const PREPEND_MARKER: char = '+';

/// Errors that can occur while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file could not be written.
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config text is not valid INI.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A setting has a value that cannot be used.
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// One `[namespaces]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMapping {
    /// Namespace prefix as written (normalized when applied).
    pub prefix: String,

    /// Base directory, already resolved against the config location.
    pub base_dir: String,

    /// Whether the directory is searched before earlier ones.
    pub prepend: bool,
}

impl NamespaceMapping {
    /// Create a mapping searched after earlier directories for the prefix.
    pub fn new(prefix: impl Into<String>, base_dir: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            base_dir: base_dir.into(),
            prepend: false,
        }
    }

    /// Mark the mapping as prepended.
    pub fn prepended(mut self) -> Self {
        self.prepend = true;
        self
    }
}

/// Autoloader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoloadConfig {
    /// Source file extension appended to candidate paths.
    pub extension: String,

    /// Report unreadable candidate locations as errors.
    pub strict_permissions: bool,

    /// Namespace mappings, applied in order.
    pub namespaces: Vec<NamespaceMapping>,
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            strict_permissions: false,
            namespaces: Vec::new(),
        }
    }
}

impl AutoloadConfig {
    /// Create an empty configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Enable or disable strict permission checking.
    pub fn with_strict_permissions(mut self, strict: bool) -> Self {
        self.strict_permissions = strict;
        self
    }

    /// Add a namespace mapping.
    pub fn with_namespace(mut self, mapping: NamespaceMapping) -> Self {
        self.namespaces.push(mapping);
        self
    }

    /// Load configuration from an INI file.
    ///
    /// Relative base directories resolve against the file's parent directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_ini_str(&text, base)?;
        debug!(
            path = %path.display(),
            namespaces = config.namespaces.len(),
            "Loaded autoload config"
        );
        Ok(config)
    }

    /// Parse configuration from INI text.
    ///
    /// Relative base directories resolve against `base`. Write namespace
    /// keys ending in `\` with a space before `=`; `blog\=src` is rejected.
    pub fn from_ini_str(text: &str, base: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str_opt(text, parse_option())
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some(AUTOLOAD_SECTION)) {
            if let Some(extension) = section.get("extension") {
                config.extension = extension.trim().to_string();
            }
            if let Some(strict) = section.get("strict_permissions") {
                config.strict_permissions = parse_bool("strict_permissions", strict)?;
            }
        }

        if let Some(section) = ini.section(Some(NAMESPACES_SECTION)) {
            for (prefix, value) in section.iter() {
                config.namespaces.push(parse_mapping(prefix, value, base)?);
            }
        }

        Ok(config)
    }

    /// Write the configuration as an INI file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.with_section(Some(AUTOLOAD_SECTION))
            .set("extension", self.extension.as_str())
            .set("strict_permissions", self.strict_permissions.to_string());

        for mapping in &self.namespaces {
            let value = if mapping.prepend {
                format!("{}{}", PREPEND_MARKER, mapping.base_dir)
            } else {
                mapping.base_dir.clone()
            };

            match ini.section_mut(Some(NAMESPACES_SECTION)) {
                Some(section) => section.append(mapping.prefix.as_str(), value),
                None => {
                    ini.with_section(Some(NAMESPACES_SECTION))
                        .set(mapping.prefix.as_str(), value);
                }
            }
        }

        // Keys end in `\`, which must not touch the `=`.
        let option = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            kv_separator: " = ",
            ..WriteOption::default()
        };
        ini.write_to_file_opt(path, option)
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Build an autoloader from this configuration.
    pub fn build<L: SourceLoader>(&self, loader: L) -> Autoloader<L> {
        let mut autoloader = Autoloader::new(loader)
            .with_extension(self.extension.as_str())
            .with_strict_permissions(self.strict_permissions);

        for mapping in &self.namespaces {
            autoloader.add_namespace(&mapping.prefix, &mapping.base_dir, mapping.prepend);
        }
        autoloader
    }
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn parse_mapping(prefix: &str, value: &str, base: &Path) -> Result<NamespaceMapping, ConfigError> {
    // `blog\=src` makes the reader swallow `\=` and following lines into the key.
    if prefix.contains(['=', '\n']) {
        return Err(ConfigError::InvalidValue {
            key: NAMESPACES_SECTION.to_string(),
            value: format!("{} (put a space before '=' after a trailing '\\')", prefix),
        });
    }

    let value = value.trim();
    let (prepend, dir) = match value.strip_prefix(PREPEND_MARKER) {
        Some(rest) => (true, rest.trim()),
        None => (false, value),
    };

    if dir.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: format!("{}.{}", NAMESPACES_SECTION, prefix),
            value: value.to_string(),
        });
    }

    let dir_path = Path::new(dir);
    let base_dir = if dir_path.is_absolute() || base.as_os_str().is_empty() {
        dir.to_string()
    } else {
        base.join(dir_path).to_string_lossy().into_owned()
    };

    Ok(NamespaceMapping {
        prefix: prefix.trim().to_string(),
        base_dir,
        prepend,
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: format!("{}.{}", AUTOLOAD_SECTION, key),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::loader::LoadError;
    use crate::namespace::Prefix;

    const SAMPLE: &str = "\
[autoload]
extension = .inc
strict_permissions = yes

[namespaces]
blog\\ = src
blog\\ = /opt/vendor/blog
app\\Http = +app/http
";

    fn noop(_: &Path) -> Result<(), LoadError> {
        Ok(())
    }

    #[test]
    fn test_default_config() {
        let config = AutoloadConfig::default();
        assert_eq!(config.extension, ".php");
        assert!(!config.strict_permissions);
        assert!(config.namespaces.is_empty());
    }

    #[test]
    fn test_parse_sample() {
        let config = AutoloadConfig::from_ini_str(SAMPLE, Path::new("/project")).unwrap();

        assert_eq!(config.extension, ".inc");
        assert!(config.strict_permissions);
        assert_eq!(
            config.namespaces,
            vec![
                NamespaceMapping::new("blog\\", "/project/src"),
                NamespaceMapping::new("blog\\", "/opt/vendor/blog"),
                NamespaceMapping::new("app\\Http", "/project/app/http").prepended(),
            ]
        );
    }

    #[test]
    fn test_relative_dirs_kept_without_base() {
        let config =
            AutoloadConfig::from_ini_str("[namespaces]\nblog = src\n", Path::new("")).unwrap();
        assert_eq!(config.namespaces[0].base_dir, "src");
    }

    #[test]
    fn test_invalid_bool() {
        let err = AutoloadConfig::from_ini_str(
            "[autoload]\nstrict_permissions = maybe\n",
            Path::new(""),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("autoload.strict_permissions"));
    }

    #[test]
    fn test_empty_directory_rejected() {
        let err =
            AutoloadConfig::from_ini_str("[namespaces]\nblog = +\n", Path::new("")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_build_applies_mappings_in_order() {
        let config = AutoloadConfig::new()
            .with_extension(".inc")
            .with_namespace(NamespaceMapping::new("blog", "/d2"))
            .with_namespace(NamespaceMapping::new("blog", "/d1").prepended());

        let autoloader = config.build(noop);
        let dirs: Vec<&str> = autoloader
            .registry()
            .directories(&Prefix::new("blog"))
            .unwrap()
            .iter()
            .map(|d| d.as_str())
            .collect();

        assert_eq!(dirs, vec!["/d1/", "/d2/"]);
        assert_eq!(autoloader.extension(), ".inc");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = AutoloadConfig::load(temp.path().join("missing.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_save_then_load_keeps_mappings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);

        let config = AutoloadConfig::new()
            .with_strict_permissions(true)
            .with_namespace(NamespaceMapping::new("blog\\", "/srv/src"))
            .with_namespace(NamespaceMapping::new("blog\\", "/srv/lib"))
            .with_namespace(NamespaceMapping::new("app", "/srv/app").prepended());
        config.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("blog\\ = /srv/src"));
        assert!(text.contains("blog\\ = /srv/lib"));

        let loaded = AutoloadConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_key_glued_to_separator_rejected() {
        let result = AutoloadConfig::from_ini_str(
            "[namespaces]\nblog\\=src\napp\\=lib\nx = y\n",
            Path::new(""),
        );
        match result {
            Err(ConfigError::InvalidValue { value, .. }) => {
                assert!(value.contains("space before '='"));
            }
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected an error, got {:?}", other),
        }
    }
}
