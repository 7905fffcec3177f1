//! Prefix to base directory mapping.
//!
//! The [`Registry`] is built incrementally through
//! [`add_namespace`](Registry::add_namespace) calls during startup and is
//! read-only afterwards. Entries are never removed.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::namespace::{BaseDir, Prefix};

/// Mapping from a normalized namespace prefix to its ordered base directories.
///
/// Directories for a prefix are searched in stored order. Prefixes are kept
/// in a sorted map so listings are stable; the order of prefixes plays no
/// part in resolution.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Registry {
    prefixes: BTreeMap<Prefix, Vec<BaseDir>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a base directory for a namespace prefix.
    ///
    /// Both values are normalized before insertion. With `prepend` the
    /// directory is searched before those already registered, otherwise
    /// after them. The same directory may be registered more than once; it
    /// is then searched more than once.
    pub fn add_namespace(
        &mut self,
        prefix: impl AsRef<str>,
        base_dir: impl AsRef<str>,
        prepend: bool,
    ) {
        let prefix = Prefix::new(prefix);
        let base_dir = BaseDir::new(base_dir);

        debug!(prefix = %prefix, base_dir = %base_dir, prepend, "Registering namespace");

        let dirs = self.prefixes.entry(prefix).or_default();
        if prepend {
            dirs.insert(0, base_dir);
        } else {
            dirs.push(base_dir);
        }
    }

    /// Base directories for a prefix, in search order.
    ///
    /// Accepts either a [`Prefix`] or a `&str` already in normalized form
    /// (e.g. `"blog\\"`). A non-normalized string simply finds nothing.
    pub fn directories<Q>(&self, prefix: &Q) -> Option<&[BaseDir]>
    where
        Prefix: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.prefixes.get(prefix).map(Vec::as_slice)
    }

    /// Check if a prefix has any registered directories.
    pub fn contains<Q>(&self, prefix: &Q) -> bool
    where
        Prefix: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.prefixes.contains_key(prefix)
    }

    /// All registered prefixes, sorted.
    pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
        self.prefixes.keys()
    }

    /// All entries, sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&Prefix, &[BaseDir])> {
        self.prefixes.iter().map(|(p, d)| (p, d.as_slice()))
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if no prefix has been registered.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
