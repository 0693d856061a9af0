//! Configuration sources.
//!
//! A source is the innermost layer of resolution: a named, ordinal-ranked
//! provider of raw name/value pairs. Sources come in two forms:
//!
//! - **Eager** sources ([`MapSource`], [`EnvSource`], [`TomlFileSource`])
//!   are fully built before the pipeline is assembled.
//! - **Deferred** sources are produced by a [`SourceFactory`] during build,
//!   after the eager sources can already be read through a [`SourceContext`].

pub mod env;
pub mod errors;
pub mod factory;
pub mod locations;
pub mod map;
pub mod toml_file;
pub mod traits;

pub use env::{ENV_SOURCE_NAME, ENV_SOURCE_ORDINAL, EnvSource};
pub use errors::SourceError;
pub use factory::{DEFAULT_FACTORY_PRIORITY, SourceContext, SourceFactory};
pub use locations::{LOCATIONS_KEY, LocationsFactory};
pub use map::{DEFAULT_VALUES_NAME, DEFAULT_VALUES_ORDINAL, MapSource};
pub use toml_file::TomlFileSource;
pub use traits::{CONFIG_ORDINAL_KEY, ConfigSource, DEFAULT_ORDINAL};
