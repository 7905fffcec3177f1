//! Resolution error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::LoadError;

/// Errors that abort a resolution.
///
/// A class that maps to no file is not an error: resolution returns
/// `Ok(None)` and the host reports the unknown symbol on its own terms.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A mapped file was found but the loader failed on it.
    #[error("failed to load class {class}: {source}")]
    Load {
        class: String,
        #[source]
        source: LoadError,
    },

    /// A candidate path could not be probed for lack of permission.
    ///
    /// Only reported when strict permission checking is enabled.
    #[error("permission denied while probing {} for class {class}", path.display())]
    PermissionDenied { class: String, path: PathBuf },
}

impl ResolveError {
    /// The class whose resolution failed.
    pub fn class(&self) -> &str {
        match self {
            Self::Load { class, .. } => class,
            Self::PermissionDenied { class, .. } => class,
        }
    }
}
