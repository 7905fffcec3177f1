//! Autoloader - namespace-prefix class autoloading
//!
//! Maps namespace prefixes to base directories and, given a fully-qualified
//! class name such as `blog\Controller\Home`, locates the class file and
//! hands it to the host's load primitive on first use.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ ResolverChain (owned by the host)        │
//! │   ├── Autoloader                         │
//! │   │     ├── Registry  prefix -> [dirs]   │
//! │   │     ├── SourceLoader (injected)      │
//! │   │     └── loaded set (at-most-once)    │
//! │   └── ... other ClassResolvers           │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use autoloader::{AutoloadConfig, ReadSourceLoader, ResolverChain};
//!
//! let config = AutoloadConfig::load("autoload.ini")?;
//! let mut chain = ResolverChain::new();
//! config.build(ReadSourceLoader::new()).register(&mut chain);
//!
//! match chain.resolve("blog\\Controller\\Home")? {
//!     Some(path) => println!("loaded {}", path.display()),
//!     None => println!("not found"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod loader;
pub mod logging;
pub mod namespace;
pub mod registry;
pub mod resolver;

pub use config::{AutoloadConfig, ConfigError, NamespaceMapping, DEFAULT_CONFIG_FILE};
pub use loader::{LoadError, LoadedSource, ReadSourceLoader, SourceLoader};
pub use namespace::{BaseDir, Prefix};
pub use registry::Registry;
pub use resolver::{Autoloader, Candidate, ClassResolver, ResolveError, ResolverChain};
