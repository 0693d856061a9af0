//! ordo-core: Ordered configuration resolution pipeline
//!
//! A lookup passes through a chain of interceptor stages before reaching a
//! set of ordinal-ranked sources. The stages add name relocation and
//! fallback, profile overlays, `${...}` expansion, lookup logging and secret
//! key locking.
//!
//! # Main Entry Points
//!
//! - [`config`] - Build a [`Config`] and resolve values through it
//! - [`sources`] - Built-in sources and the [`ConfigSource`] trait
//! - [`interceptors`] - The chain, the built-in stages and the [`Interceptor`] trait
//! - [`secrets`] - Per-thread secret unlocking and `${handler::secret}` handlers
//! - [`expressions`] - Expression syntax and per-thread expansion switch
//!
//! ```
//! use ordo_core::{Config, MapSource};
//!
//! let config = Config::builder()
//!     .with_source(MapSource::new("app", 100, [("host", "localhost"), ("url", "http://${host}")]))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.get_value("url").unwrap().as_deref(), Some("http://localhost"));
//! ```

pub mod config;
pub mod errors;
pub mod events;
pub mod expressions;
pub mod interceptors;
pub mod logging;
pub mod names;
pub mod profiles;
pub mod registry;
mod scope;
pub mod secrets;
pub mod sources;
pub mod value;

// Re-export commonly used types at crate root for convenience
pub use config::{BuildError, Config, ConfigBuilder, SourceInfo, StageInfo};
pub use errors::{OrdoError, OrdoResult};
pub use interceptors::{Context, Interceptor, InterceptorFactory, ResolveError};
pub use names::{NameSet, PropertyName};
pub use scope::FlagGuard;
pub use secrets::{Base64Handler, SecretKeysHandler};
pub use sources::{
    ConfigSource, EnvSource, LocationsFactory, MapSource, SourceContext, SourceError,
    SourceFactory, TomlFileSource,
};
pub use value::ConfigValue;

// Re-export logging initialization
pub use logging::init_logging;
