//! The host load primitive.
//!
//! Locating a class file is the resolver's job; executing it belongs to the
//! host. A [`SourceLoader`] is that host capability, injected into the
//! [`Autoloader`](crate::resolver::Autoloader) rather than reached through
//! global state.
//!
//! Any `Fn(&Path) -> Result<(), LoadError>` is a loader, which keeps tests
//! and simple hosts short:
//!
//! ```
//! use std::path::Path;
//! use autoloader::loader::{LoadError, SourceLoader};
//!
//! let loader = |_path: &Path| -> Result<(), LoadError> { Ok(()) };
//! assert!(loader.load(Path::new("src/Home.php")).is_ok());
//! ```

mod read;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use read::{LoadedSource, ReadSourceLoader};

/// Errors a host can report while loading a located file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but the process may not read it.
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The host refused to execute the file.
    #[error("host rejected {}: {reason}", path.display())]
    Rejected { path: PathBuf, reason: String },
}

impl LoadError {
    /// Classify an I/O error raised while loading `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } => path,
            Self::PermissionDenied { path } => path,
            Self::Rejected { path, .. } => path,
        }
    }
}

/// Executes a located source file on behalf of the host runtime.
///
/// The resolver calls `load` at most once per canonical file path, so
/// implementations need not guard against repeats themselves. A loader may
/// re-enter the resolver (a loaded file referencing further classes).
pub trait SourceLoader {
    /// Load the file at `path`.
    fn load(&self, path: &Path) -> Result<(), LoadError>;
}

impl<F> SourceLoader for F
where
    F: Fn(&Path) -> Result<(), LoadError>,
{
    fn load(&self, path: &Path) -> Result<(), LoadError> {
        self(path)
    }
}
