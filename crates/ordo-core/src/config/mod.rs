//! The assembled configuration and its builder.

mod builder;
mod errors;
mod types;

pub use builder::ConfigBuilder;
pub use errors::BuildError;
pub use types::{Config, SourceInfo, StageInfo};

/// Property that turns on lookup logging when the builder does not decide.
pub const LOG_VALUES_KEY: &str = "ordo.log.values";
