//! Ordered source registry.
//!
//! Sources are held sorted by ordinal, highest first. Sources with equal
//! ordinals keep registration order, so the one registered first wins.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::names::NameSet;
use crate::sources::{ConfigSource, SourceError};
use crate::value::ConfigValue;

/// The innermost layer of the pipeline: plain lookups over ranked sources.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn ConfigSource>>,
}

impl SourceRegistry {
    pub fn new(mut sources: Vec<Arc<dyn ConfigSource>>) -> Self {
        // sort_by_key is stable: equal ordinals keep registration order
        sources.sort_by_key(|source| std::cmp::Reverse(source.ordinal()));
        debug!(
            event = "core.registry.sources_ordered",
            count = sources.len(),
            order = ?sources.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        Self { sources }
    }

    /// First source that defines `name`, in priority order.
    ///
    /// The returned value carries the source's position in that order.
    pub fn resolve(&self, name: &str) -> Result<Option<ConfigValue>, SourceError> {
        for (position, source) in self.sources.iter().enumerate() {
            let found = source.get_config_value(name).inspect_err(|e| {
                warn!(
                    event = "core.registry.lookup_failed",
                    source_name = source.name(),
                    name = name,
                    error = %e
                );
            })?;
            if let Some(value) = found {
                return Ok(Some(value.with_source_position(position)));
            }
        }
        Ok(None)
    }

    /// Union of every source's names, deduplicated by canonical form.
    ///
    /// When two sources spell a name differently, the spelling from the
    /// higher-priority source is kept.
    pub fn property_names(&self) -> Result<NameSet, SourceError> {
        let mut names = NameSet::new();
        for source in &self.sources {
            names.extend(source.property_names()?);
        }
        Ok(names)
    }

    /// One winning value per unique name.
    pub fn values(&self) -> Result<Vec<ConfigValue>, SourceError> {
        let mut values = Vec::new();
        for name in self.property_names()?.iter() {
            if let Some(value) = self.resolve(name)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Sources in priority order.
    pub fn sources(&self) -> impl Iterator<Item = &dyn ConfigSource> {
        self.sources.iter().map(|source| source.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| (s.name(), s.ordinal())))
            .finish()
    }
}
