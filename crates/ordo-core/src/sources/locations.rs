//! Extra TOML files named by configuration.

use std::path::PathBuf;

use tracing::info;

use super::factory::{SourceContext, SourceFactory};
use super::toml_file::TomlFileSource;
use super::traits::{ConfigSource, DEFAULT_ORDINAL};
use crate::config::BuildError;

/// Property listing additional TOML files, comma separated.
pub const LOCATIONS_KEY: &str = "ordo.config.locations";

/// Loads every file listed under [`LOCATIONS_KEY`].
///
/// Files that do not exist are skipped. A file that exists but cannot be
/// read or parsed fails the build.
#[derive(Debug, Clone)]
pub struct LocationsFactory {
    ordinal: i32,
}

impl LocationsFactory {
    pub fn new() -> Self {
        Self {
            ordinal: DEFAULT_ORDINAL,
        }
    }

    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }
}

impl Default for LocationsFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFactory for LocationsFactory {
    fn name(&self) -> &str {
        "locations"
    }

    fn sources(&self, context: &SourceContext<'_>) -> Result<Vec<Box<dyn ConfigSource>>, BuildError> {
        let Some(value) = context.get_value(LOCATIONS_KEY)? else {
            return Ok(Vec::new());
        };
        let locations: Vec<PathBuf> = value
            .value()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .map(PathBuf::from)
            .collect();

        let mut sources: Vec<Box<dyn ConfigSource>> = Vec::new();
        for location in &locations {
            if let Some(source) = TomlFileSource::load_optional(location, self.ordinal)? {
                sources.push(Box::new(source));
            }
        }
        info!(
            event = "core.sources.locations_loaded",
            requested = locations.len(),
            loaded = sources.len()
        );
        Ok(sources)
    }
}
