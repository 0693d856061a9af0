use std::sync::Arc;

use super::context::Context;
use super::errors::ResolveError;
use super::stages::{ExpressionStage, LoggingStage, NameMappingStage, ProfileStage, SecretKeysStage};
use super::traits::Interceptor;
use crate::names::NameSet;
use crate::value::ConfigValue;

/// A stage as stored in the chain: a built-in variant or a user interceptor.
pub enum Stage {
    SecretKeys(SecretKeysStage),
    Logging(LoggingStage),
    Expression(ExpressionStage),
    Mapping(NameMappingStage),
    Profile(ProfileStage),
    Custom(Arc<dyn Interceptor>),
}

impl Stage {
    fn as_interceptor(&self) -> &dyn Interceptor {
        match self {
            Stage::SecretKeys(stage) => stage,
            Stage::Logging(stage) => stage,
            Stage::Expression(stage) => stage,
            Stage::Mapping(stage) => stage,
            Stage::Profile(stage) => stage,
            Stage::Custom(stage) => stage.as_ref(),
        }
    }

    pub fn name(&self) -> &str {
        self.as_interceptor().name()
    }

    pub fn is_enabled(&self) -> bool {
        self.as_interceptor().is_enabled()
    }

    pub(crate) fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        self.as_interceptor().get_value(context, name)
    }

    pub(crate) fn iterate_names(&self, context: &Context<'_>) -> Result<NameSet, ResolveError> {
        self.as_interceptor().iterate_names(context)
    }

    pub(crate) fn iterate_values(&self, context: &Context<'_>) -> Result<Vec<ConfigValue>, ResolveError> {
        self.as_interceptor().iterate_values(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptors::{Chain, MAX_DEPTH};
    use crate::registry::SourceRegistry;
    use crate::sources::MapSource;

    struct Suffix(&'static str);

    impl Interceptor for Suffix {
        fn name(&self) -> &str {
            self.0
        }

        fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
            let value = context.proceed(name)?;
            Ok(value.map(|v| {
                let suffixed = format!("{}{}", v.value().unwrap_or_default(), self.0);
                v.with_value(suffixed)
            }))
        }
    }

    struct ShortCircuit;

    impl Interceptor for ShortCircuit {
        fn name(&self) -> &str {
            "short"
        }

        fn get_value(&self, _context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
            Ok(Some(ConfigValue::new(name, "fixed", "short", 0)))
        }
    }

    struct Recurse;

    impl Interceptor for Recurse {
        fn name(&self) -> &str {
            "recurse"
        }

        fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
            if context.depth() >= MAX_DEPTH {
                return Err(ResolveError::ExpansionTooDeep { name: name.to_string() });
            }
            context.reenter().proceed(name)
        }
    }

    fn chain() -> Chain {
        let registry = SourceRegistry::new(vec![Arc::new(MapSource::new("map", 100, [("a", "v")]))]);
        Chain::new(registry)
    }

    #[test]
    fn test_empty_chain_reads_sources() {
        let chain = chain();
        let value = chain.context().proceed("a").unwrap().unwrap();
        assert_eq!(value.value(), Some("v"));
    }

    #[test]
    fn test_outermost_stage_runs_first() {
        let mut chain = chain();
        chain.push(1, Stage::Custom(Arc::new(Suffix("-inner"))));
        chain.push(2, Stage::Custom(Arc::new(Suffix("-outer"))));
        let value = chain.context().proceed("a").unwrap().unwrap();
        // inner appends first, outer appends to its result
        assert_eq!(value.value(), Some("v-inner-outer"));
        assert_eq!(chain.stages(), vec![("-outer", 2), ("-inner", 1)]);
    }

    #[test]
    fn test_short_circuit_skips_inner_stages() {
        let mut chain = chain();
        chain.push(1, Stage::Custom(Arc::new(Suffix("-inner"))));
        chain.push(2, Stage::Custom(Arc::new(ShortCircuit)));
        let value = chain.context().proceed("missing").unwrap().unwrap();
        assert_eq!(value.value(), Some("fixed"));
    }

    #[test]
    fn test_reentry_is_bounded_by_depth() {
        let mut chain = chain();
        chain.push(1, Stage::Custom(Arc::new(Recurse)));
        let result = chain.context().proceed("a");
        assert!(matches!(result, Err(ResolveError::ExpansionTooDeep { .. })));
    }

    #[test]
    fn test_enumeration_passes_through_by_default() {
        let mut chain = chain();
        chain.push(1, Stage::Custom(Arc::new(Suffix("-x"))));
        let names = chain.context().iterate_names().unwrap().into_vec();
        assert_eq!(names, vec!["a".to_string()]);
        assert_eq!(chain.context().iterate_values().unwrap().len(), 1);
    }
}
