//! Namespace-prefix class resolution.
//!
//! The [`Autoloader`] owns a [`Registry`] of namespace prefixes and, given a
//! fully-qualified class name, walks its namespace segments from right to
//! left looking for a mapped file. The first file found is handed to the
//! injected [`SourceLoader`] and its path returned.
//!
//! # Resolution Walk
//!
//! For `blog\Model\Post\Entity` the prefixes tried are, in order:
//!
//! ```text
//! blog\Model\Post\   relative: Entity
//! blog\Model\        relative: Post\Entity
//! blog\              relative: Model\Post\Entity
//! ```
//!
//! For each registered prefix, its base directories are probed in stored
//! order and the first existing regular file wins. No further directory or
//! prefix is tried once a file is found, so a shorter prefix can only win
//! when every longer one misses.
//!
//! # At-Most-Once Loading
//!
//! Loaded files are tracked by canonical path. Resolving a class whose file
//! was already loaded returns the path without calling the loader again.
//!
//! # Example
//!
//! ```no_run
//! use autoloader::{Autoloader, ReadSourceLoader, ResolverChain};
//!
//! let mut autoloader = Autoloader::new(ReadSourceLoader::new());
//! autoloader.add_namespace("blog", "/var/www/blog/src", false);
//! autoloader.add_namespace("blog\\Legacy", "/var/www/legacy", true);
//!
//! let mut chain = ResolverChain::new();
//! autoloader.register(&mut chain);
//!
//! if let Some(path) = chain.resolve("blog\\Controller\\Home")? {
//!     println!("Loaded {}", path.display());
//! }
//! # Ok::<(), autoloader::ResolveError>(())
//! ```

mod chain;
mod error;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::loader::SourceLoader;
use crate::namespace::{BaseDir, Prefix, DEFAULT_EXTENSION, NAMESPACE_SEPARATOR};
use crate::registry::Registry;

pub use chain::ResolverChain;
pub use error::ResolveError;

/// Anything that can map a class name to a loaded file.
///
/// `Ok(None)` means the class is not mapped by this resolver.
pub trait ClassResolver {
    /// Resolve and load the file for `class`.
    fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError>;
}

impl<R: ClassResolver + ?Sized> ClassResolver for &R {
    fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError> {
        (**self).resolve(class)
    }
}

impl<R: ClassResolver + ?Sized> ClassResolver for Box<R> {
    fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError> {
        (**self).resolve(class)
    }
}

impl<R: ClassResolver + ?Sized> ClassResolver for Rc<R> {
    fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError> {
        (**self).resolve(class)
    }
}

impl<R: ClassResolver + ?Sized> ClassResolver for Arc<R> {
    fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError> {
        (**self).resolve(class)
    }
}

/// A single probe the resolution walk would make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Registered prefix the probe belongs to.
    pub prefix: Prefix,

    /// Base directory being probed.
    pub base_dir: BaseDir,

    /// Full candidate file path.
    pub path: PathBuf,
}

/// Resolves class names to files through registered namespace prefixes.
pub struct Autoloader<L> {
    registry: Registry,
    loader: L,
    extension: String,
    strict_permissions: bool,
    /// A mutex rather than a `RefCell` so the loader can re-enter `resolve`.
    loaded: Mutex<HashSet<PathBuf>>,
}

impl<L: SourceLoader> Autoloader<L> {
    /// Create an autoloader with an empty registry.
    pub fn new(loader: L) -> Self {
        Self::with_registry(Registry::new(), loader)
    }

    /// Create an autoloader over an already populated registry.
    pub fn with_registry(registry: Registry, loader: L) -> Self {
        Self {
            registry,
            loader,
            extension: DEFAULT_EXTENSION.to_string(),
            strict_permissions: false,
            loaded: Mutex::new(HashSet::new()),
        }
    }

    /// Set the source file extension (default `.php`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Report unreadable candidate locations as errors instead of skipping them.
    pub fn with_strict_permissions(mut self, strict: bool) -> Self {
        self.strict_permissions = strict;
        self
    }

    /// Add a base directory for a namespace prefix.
    ///
    /// See [`Registry::add_namespace`].
    pub fn add_namespace(
        &mut self,
        prefix: impl AsRef<str>,
        base_dir: impl AsRef<str>,
        prepend: bool,
    ) {
        self.registry.add_namespace(prefix, base_dir, prepend);
    }

    /// Install this autoloader at the end of a resolver chain.
    pub fn register(self, chain: &mut ResolverChain)
    where
        L: 'static,
    {
        chain.register(self);
    }

    /// Resolve a fully-qualified class name and load its file.
    ///
    /// Returns the loaded path, or `None` when no registered prefix maps the
    /// class to an existing file.
    pub fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError> {
        let mut end = class.len();

        while let Some(pos) = class[..end].rfind(NAMESPACE_SEPARATOR) {
            let prefix = &class[..=pos];
            let relative = &class[pos + 1..];

            if let Some(path) = self.try_load(prefix, relative)? {
                debug!(class, prefix, path = %path.display(), "Resolved class");
                return Ok(Some(path));
            }

            // Drop the trailing separator run before scanning for the next one.
            end = prefix.trim_end_matches(NAMESPACE_SEPARATOR).len();
        }

        debug!(class, "No mapped file for class");
        Ok(None)
    }

    /// Try to load the mapped file for one prefix and relative class name.
    ///
    /// `prefix` is matched textually against the normalized registry keys,
    /// so it must carry its trailing separator.
    pub fn try_load(
        &self,
        prefix: &str,
        relative_class: &str,
    ) -> Result<Option<PathBuf>, ResolveError> {
        let Some(dirs) = self.registry.directories(prefix) else {
            return Ok(None);
        };

        for dir in dirs {
            let path = dir.candidate(relative_class, &self.extension);
            trace!(prefix, path = %path.display(), "Probing candidate");

            if self.is_loadable(prefix, relative_class, &path)? {
                self.require(&path).map_err(|source| ResolveError::Load {
                    class: format!("{}{}", prefix, relative_class),
                    source,
                })?;
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Every probe resolving `class` would make, in order.
    ///
    /// Touches neither the filesystem nor the loader.
    pub fn candidates(&self, class: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut end = class.len();

        while let Some(pos) = class[..end].rfind(NAMESPACE_SEPARATOR) {
            let prefix = &class[..=pos];
            let relative = &class[pos + 1..];

            if let Some(dirs) = self.registry.directories(prefix) {
                candidates.extend(dirs.iter().map(|dir| Candidate {
                    prefix: Prefix::new(prefix),
                    base_dir: dir.clone(),
                    path: dir.candidate(relative, &self.extension),
                }));
            }

            end = prefix.trim_end_matches(NAMESPACE_SEPARATOR).len();
        }

        candidates
    }

    /// Files loaded so far, keyed by canonical path, sorted.
    pub fn loaded(&self) -> Vec<PathBuf> {
        let mut loaded: Vec<PathBuf> = self.loaded.lock().iter().cloned().collect();
        loaded.sort();
        loaded
    }

    /// The prefix registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The injected loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The source file extension in use.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check whether a candidate path is an existing regular file.
    fn is_loadable(
        &self,
        prefix: &str,
        relative_class: &str,
        path: &Path,
    ) -> Result<bool, ResolveError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                if self.strict_permissions {
                    return Err(ResolveError::PermissionDenied {
                        class: format!("{}{}", prefix, relative_class),
                        path: path.to_path_buf(),
                    });
                }
                warn!(path = %path.display(), "Permission denied probing candidate, skipping");
                Ok(false)
            }
            Err(_) => Ok(false),
        }
    }

    /// Load a file unless it was loaded before.
    fn require(&self, path: &Path) -> Result<(), crate::loader::LoadError> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        // The guard is released before the loader runs so it may re-enter.
        let first_load = self.loaded.lock().insert(key.clone());
        if !first_load {
            trace!(path = %path.display(), "Already loaded");
            return Ok(());
        }

        if let Err(e) = self.loader.load(path) {
            self.loaded.lock().remove(&key);
            return Err(e);
        }
        Ok(())
    }
}

impl<L: SourceLoader> ClassResolver for Autoloader<L> {
    fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError> {
        Autoloader::resolve(self, class)
    }
}

impl<L> std::fmt::Debug for Autoloader<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autoloader")
            .field("registry", &self.registry)
            .field("extension", &self.extension)
            .field("strict_permissions", &self.strict_permissions)
            .field("loaded", &self.loaded.lock().len())
            .finish()
    }
}
