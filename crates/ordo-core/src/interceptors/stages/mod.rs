//! Built-in stages.

pub mod expression;
pub mod logging;
pub mod mapping;
pub mod profile;
pub mod secret;

pub use expression::ExpressionStage;
pub use logging::LoggingStage;
pub use mapping::{MappingStrategy, NameMappingStage};
pub use profile::ProfileStage;
pub use secret::SecretKeysStage;

use crate::expressions;
use crate::interceptors::{Context, ResolveError};
use crate::value::ConfigValue;

/// Look `name` up below `context` with expansion off.
///
/// Stages that only compare ordinals use this so a broken expression in a
/// value that loses the comparison cannot fail the lookup.
pub(crate) fn lookup_raw(context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
    expressions::without_expansion(|| context.proceed(name))
}

/// Resolve enumeration winners again below `context`, expanded.
///
/// Each winner is paired with the name it was found under. The result keeps
/// the winner's reported name and profile. With expansion off the winners
/// are returned unchanged.
pub(crate) fn expand_winners<I>(context: &Context<'_>, winners: I) -> Result<Vec<ConfigValue>, ResolveError>
where
    I: IntoIterator<Item = (String, ConfigValue)>,
{
    let winners = winners.into_iter();
    if !expressions::is_enabled() {
        return Ok(winners.map(|(_, winner)| winner).collect());
    }
    let mut values = Vec::new();
    for (lookup, winner) in winners {
        let Some(found) = context.proceed(&lookup)? else {
            continue;
        };
        let found = found.with_name(winner.name());
        values.push(match winner.profile() {
            Some(profile) => found.with_profile(profile),
            None => found,
        });
    }
    Ok(values)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::interceptors::{Chain, Stage};
    use crate::registry::SourceRegistry;
    use crate::sources::{ConfigSource, MapSource};

    pub fn source(name: &str, ordinal: i32, entries: &[(&str, &str)]) -> Arc<dyn ConfigSource> {
        Arc::new(MapSource::new(name, ordinal, entries.iter().copied()))
    }

    /// A chain over `sources` with `stages` pushed innermost first.
    pub fn chain(sources: Vec<Arc<dyn ConfigSource>>, stages: Vec<Stage>) -> Chain {
        let mut chain = Chain::new(SourceRegistry::new(sources));
        for (priority, stage) in stages.into_iter().enumerate() {
            chain.push(priority as i32, stage);
        }
        chain
    }
}
