//! Name relocation and fallback.
//!
//! Both stages hold a table from an original name to a mapped name and
//! differ only in which of the two is consulted first:
//!
//! | Strategy   | Lookup order       | Result when both resolve      |
//! |------------|--------------------|-------------------------------|
//! | Relocate   | mapped, original   | higher ordinal, mapped on tie |
//! | Fallback   | original, mapped   | original if non-empty         |
//!
//! Results are always reported under the name the caller asked for. The
//! two candidates are compared unexpanded and only the winner is expanded.

use std::collections::{BTreeMap, HashMap};

use super::{expand_winners, lookup_raw};
use crate::expressions;
use crate::interceptors::{Context, Interceptor, ResolveError};
use crate::names::{NameSet, PropertyName};
use crate::value::ConfigValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingStrategy {
    Relocate,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct NameMappingStage {
    strategy: MappingStrategy,
    mappings: HashMap<PropertyName, String>,
}

impl NameMappingStage {
    pub fn new<I, K, V>(strategy: MappingStrategy, mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mappings = mappings
            .into_iter()
            .map(|(from, to)| (PropertyName::new(from.into()), to.into()))
            .filter(|(from, to)| from.canonical() != crate::names::canonicalize(to))
            .collect();
        Self { strategy, mappings }
    }

    pub fn relocate<I, K, V>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(MappingStrategy::Relocate, mappings)
    }

    pub fn fallback<I, K, V>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(MappingStrategy::Fallback, mappings)
    }

    pub fn strategy(&self) -> MappingStrategy {
        self.strategy
    }

    fn mapped(&self, name: &str) -> Option<&str> {
        self.mappings.get(&PropertyName::new(name)).map(String::as_str)
    }

    /// Whether the mapped name's value beats the original's.
    fn mapped_wins(&self, original: Option<&ConfigValue>, mapped: &ConfigValue) -> bool {
        match self.strategy {
            MappingStrategy::Relocate => {
                !original.is_some_and(|original| original.outranks(mapped))
            }
            MappingStrategy::Fallback => !original.is_some_and(has_content),
        }
    }
}

fn has_content(value: &ConfigValue) -> bool {
    value.value().is_some_and(|v| !v.is_empty())
}

impl Interceptor for NameMappingStage {
    fn name(&self) -> &str {
        match self.strategy {
            MappingStrategy::Relocate => "relocate",
            MappingStrategy::Fallback => "fallback",
        }
    }

    fn is_enabled(&self) -> bool {
        !self.mappings.is_empty()
    }

    fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        let Some(target) = self.mapped(name) else {
            return context.proceed(name);
        };
        let relabel = |value: ConfigValue| value.with_name(name);
        match self.strategy {
            MappingStrategy::Relocate => {
                let Some(relocated) = lookup_raw(context, target)? else {
                    return context.proceed(name);
                };
                let original = lookup_raw(context, name)?;
                if self.mapped_wins(original.as_ref(), &relocated) {
                    Ok(context.proceed(target)?.map(relabel))
                } else {
                    context.proceed(name)
                }
            }
            MappingStrategy::Fallback => {
                let original = context.proceed(name)?;
                if original.as_ref().is_some_and(has_content) {
                    return Ok(original);
                }
                Ok(context.proceed(target)?.map(relabel).or(original))
            }
        }
    }

    fn iterate_names(&self, context: &Context<'_>) -> Result<NameSet, ResolveError> {
        let mut names = context.iterate_names()?;
        let mut aliases = Vec::new();
        for (from, to) in &self.mappings {
            if names.contains(to) && readable(context, from.as_str())? {
                aliases.push(from.as_str().to_string());
            }
        }
        names.extend(aliases);
        Ok(names)
    }

    fn iterate_values(&self, context: &Context<'_>) -> Result<Vec<ConfigValue>, ResolveError> {
        // name -> (name the winner was found under, winner)
        let mut by_name: BTreeMap<PropertyName, (String, ConfigValue)> =
            expressions::without_expansion(|| context.iterate_values())?
                .into_iter()
                .map(|value| (PropertyName::new(value.name()), (value.name().to_string(), value)))
                .collect();
        for (from, to) in &self.mappings {
            let Some((_, mapped)) = by_name.get(&PropertyName::new(to.as_str())) else {
                continue;
            };
            if !readable(context, from.as_str())? {
                continue;
            }
            if self.mapped_wins(by_name.get(from).map(|(_, value)| value), mapped) {
                let alias = mapped.with_name(from.as_str());
                by_name.insert(from.clone(), (to.clone(), alias));
            }
        }
        expand_winners(context, by_name.into_values())
    }
}

/// Whether the caller may read `name` itself.
///
/// An alias is only listed when looking up its own name would not be
/// denied, so enumeration never shows a secret the caller cannot read.
fn readable(context: &Context<'_>, name: &str) -> Result<bool, ResolveError> {
    match lookup_raw(context, name) {
        Ok(_) => Ok(true),
        Err(ResolveError::AccessDenied { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}
