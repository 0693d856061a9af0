//! Deferred source construction.

use super::traits::ConfigSource;
use crate::config::BuildError;
use crate::interceptors::{Context, ResolveError};
use crate::value::ConfigValue;

/// Priority for factories that do not declare one.
pub const DEFAULT_FACTORY_PRIORITY: i32 = 100;

/// Produces sources once the eager sources are readable.
///
/// Factories run in ascending [`priority`](Self::priority) order, each exactly
/// once per build. A failing factory aborts the build.
pub trait SourceFactory: Send + Sync {
    fn name(&self) -> &str;

    /// Build this factory's sources. Lookups through `context` see only the
    /// eager sources, with profiles and expansion applied.
    fn sources(&self, context: &SourceContext<'_>) -> Result<Vec<Box<dyn ConfigSource>>, BuildError>;

    fn priority(&self) -> i32 {
        DEFAULT_FACTORY_PRIORITY
    }
}

/// Read-only view of the bootstrap configuration handed to a [`SourceFactory`].
pub struct SourceContext<'a> {
    context: Context<'a>,
    profiles: &'a [String],
}

impl<'a> SourceContext<'a> {
    pub(crate) fn new(context: Context<'a>, profiles: &'a [String]) -> Self {
        Self { context, profiles }
    }

    pub fn get_value(&self, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        self.context.proceed(name)
    }

    /// Active profiles, highest precedence first.
    pub fn profiles(&self) -> &[String] {
        self.profiles
    }

    pub fn property_names(&self) -> Result<Vec<String>, ResolveError> {
        Ok(self.context.iterate_names()?.into_vec())
    }
}
