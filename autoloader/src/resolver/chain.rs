//! An explicitly owned chain of fallback class resolvers.

use std::path::PathBuf;

use tracing::{debug, trace};

use super::{ClassResolver, ResolveError};

/// Ordered list of resolvers consulted when a class is not yet known.
///
/// The chain is owned by the composition root instead of living in global
/// state. Resolvers are tried in registration order and the first one that
/// maps the class wins. Registering the same resolver twice is allowed; it
/// is then simply tried twice.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use autoloader::{Autoloader, LoadError, ResolverChain};
///
/// let mut chain = ResolverChain::new();
/// let mut loader = Autoloader::new(|_: &Path| -> Result<(), LoadError> { Ok(()) });
/// loader.add_namespace("blog", "/nonexistent/src", false);
/// loader.register(&mut chain);
///
/// assert_eq!(chain.len(), 1);
/// assert!(chain.resolve("blog\\Home").unwrap().is_none());
/// ```
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn ClassResolver>>,
}

impl ResolverChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver to the end of the chain.
    pub fn register<R>(&mut self, resolver: R)
    where
        R: ClassResolver + 'static,
    {
        self.resolvers.push(Box::new(resolver));
        debug!(position = self.resolvers.len(), "Registered class resolver");
    }

    /// Resolve a class through every registered resolver, in order.
    ///
    /// Returns the first mapped file. The first error stops the chain.
    pub fn resolve(&self, class: &str) -> Result<Option<PathBuf>, ResolveError> {
        for (index, resolver) in self.resolvers.iter().enumerate() {
            if let Some(path) = resolver.resolve(class)? {
                trace!(class, resolver = index, "Class resolved by chain");
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Number of registered resolvers.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Check if no resolver has been registered.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}
