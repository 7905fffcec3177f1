//! Namespace prefix and base directory normalization.
//!
//! Every prefix and base directory is normalized once, on its way into the
//! [`Registry`](crate::registry::Registry), so that resolution is purely
//! textual: a prefix always ends in exactly one `\` and a base directory
//! always ends in exactly one `/`.
//!
//! # Example
//!
//! ```
//! use autoloader::namespace::{BaseDir, Prefix};
//!
//! assert_eq!(Prefix::new("\\blog\\\\").as_str(), "blog\\");
//! assert_eq!(BaseDir::new("src//").as_str(), "src/");
//!
//! let dir = BaseDir::new("src");
//! assert_eq!(
//!     dir.candidate("Controller\\Home", ".php"),
//!     std::path::PathBuf::from("src/Controller/Home.php")
//! );
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::path::{PathBuf, MAIN_SEPARATOR};

use serde::Serialize;

/// Separator between namespace segments in a fully-qualified class name.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Separator used when building candidate file paths.
pub const PATH_SEPARATOR: char = '/';

/// Source file extension appended to every candidate path.
pub const DEFAULT_EXTENSION: &str = ".php";

/// A normalized namespace prefix, always ending in a single `\`.
///
/// Leading and trailing separators are stripped before the trailing one is
/// added back, so `blog`, `\blog` and `blog\\` all normalize to `blog\`.
/// An input made only of separators normalizes to the root prefix `\`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Prefix(String);

impl Prefix {
    /// Normalize a raw namespace prefix.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim_matches(NAMESPACE_SEPARATOR);
        let mut prefix = String::with_capacity(trimmed.len() + 1);
        prefix.push_str(trimmed);
        prefix.push(NAMESPACE_SEPARATOR);
        Self(prefix)
    }

    /// The normalized prefix text, including its trailing separator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the root prefix (`\`).
    pub fn is_root(&self) -> bool {
        self.0.len() == NAMESPACE_SEPARATOR.len_utf8()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the registry be queried with the raw slices produced while walking a
// class name, without allocating a `Prefix` per step.
impl Borrow<str> for Prefix {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A normalized base directory, always ending in a single `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BaseDir(String);

impl BaseDir {
    /// Normalize a raw base directory.
    ///
    /// Trailing `/` and platform separators are removed and a single `/` is
    /// appended. An empty input becomes `/`.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw
            .as_ref()
            .trim_end_matches(|c| c == PATH_SEPARATOR || c == MAIN_SEPARATOR);
        let mut dir = String::with_capacity(trimmed.len() + 1);
        dir.push_str(trimmed);
        dir.push(PATH_SEPARATOR);
        Self(dir)
    }

    /// The normalized directory text, including its trailing separator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the candidate file path for a relative class name.
    ///
    /// No filesystem access happens here.
    pub fn candidate(&self, relative_class: &str, extension: &str) -> PathBuf {
        let mut path = String::with_capacity(self.0.len() + relative_class.len() + extension.len());
        path.push_str(&self.0);
        path.push_str(&relative_path(relative_class, extension));
        PathBuf::from(path)
    }
}

impl fmt::Display for BaseDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BaseDir {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convert a relative class name into a relative file path.
///
/// `Controller\Home` with `.php` becomes `Controller/Home.php`.
pub fn relative_path(relative_class: &str, extension: &str) -> String {
    let mut path = relative_class.replace(NAMESPACE_SEPARATOR, "/");
    path.push_str(extension);
    path
}
