//! Interceptor trait definitions.

use super::context::Context;
use super::errors::ResolveError;
use super::priorities;
use crate::config::BuildError;
use crate::names::NameSet;
use crate::value::ConfigValue;

/// One stage of the resolution pipeline.
///
/// A stage may transform the request, delegate with [`Context::proceed`],
/// post-process the result, or short-circuit. The enumeration hooks default
/// to pass-through. Stages are shared by every thread using the config and
/// must not rely on per-call mutable state.
pub trait Interceptor: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> i32 {
        priorities::DEFAULT
    }

    /// Disabled stages are left out of the chain at build time.
    fn is_enabled(&self) -> bool {
        true
    }

    fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError>;

    fn iterate_names(&self, context: &Context<'_>) -> Result<NameSet, ResolveError> {
        context.iterate_names()
    }

    fn iterate_values(&self, context: &Context<'_>) -> Result<Vec<ConfigValue>, ResolveError> {
        context.iterate_values()
    }
}

/// Builds an interceptor once the stages below it are in place.
///
/// `context` resolves through the sources and every stage with a lower
/// priority than this factory, so a stage can read its own settings.
pub trait InterceptorFactory: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> i32 {
        priorities::DEFAULT
    }

    fn create(&self, context: &Context<'_>) -> Result<Box<dyn Interceptor>, BuildError>;
}
