//! A loader that reads class files into memory.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::{LoadError, SourceLoader};

/// A source file read by [`ReadSourceLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    /// Path the file was loaded from.
    pub path: PathBuf,

    /// Raw file contents.
    pub contents: Vec<u8>,
}

/// Reads each loaded file and keeps its contents, in load order.
///
/// Stands in for a host runtime when only locating and reading files
/// matters, e.g. in the CLI or in tests. Read failures are reported as
/// [`LoadError`], with permission problems kept distinct.
#[derive(Debug, Default)]
pub struct ReadSourceLoader {
    sources: Mutex<Vec<LoadedSource>>,
}

impl ReadSourceLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every file loaded so far.
    pub fn sources(&self) -> Vec<LoadedSource> {
        self.sources.lock().clone()
    }

    /// Paths loaded so far, in load order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.sources.lock().iter().map(|s| s.path.clone()).collect()
    }

    /// Number of files loaded.
    pub fn len(&self) -> usize {
        self.sources.lock().len()
    }

    /// Check if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.sources.lock().is_empty()
    }
}

impl SourceLoader for ReadSourceLoader {
    fn load(&self, path: &Path) -> Result<(), LoadError> {
        let contents = fs::read(path).map_err(|e| LoadError::from_io(path, e))?;
        debug!(path = %path.display(), bytes = contents.len(), "Read class file");

        self.sources.lock().push(LoadedSource {
            path: path.to_path_buf(),
            contents,
        });
        Ok(())
    }
}
