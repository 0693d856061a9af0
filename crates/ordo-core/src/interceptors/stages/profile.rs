//! Profile overlay.

use std::collections::BTreeMap;

use super::{expand_winners, lookup_raw};
use crate::expressions;
use crate::interceptors::{Context, Interceptor, ResolveError};
use crate::names::{NameSet, PropertyName};
use crate::profiles;
use crate::value::ConfigValue;

/// Resolves `name` as `%profile.name` for each active profile before the
/// bare name.
///
/// The first profile listed has the highest precedence. A profiled value is
/// used unless the bare name comes from a source with a strictly higher
/// ordinal. Profiled results are reported under the bare name with
/// [`ConfigValue::profile`] set.
///
/// Candidates are compared unexpanded and only the winner is expanded.
#[derive(Debug, Clone)]
pub struct ProfileStage {
    profiles: Vec<String>,
}

impl ProfileStage {
    pub fn new(profiles: Vec<String>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Split an active `%profile.` prefix off `name`.
    ///
    /// Returns the bare name and the index of the profile, or `None` when
    /// `name` has no prefix or names an inactive profile.
    fn classify<'n>(&self, name: &'n str) -> (&'n str, Option<usize>) {
        if let Some(rest) = name.strip_prefix('%')
            && let Some((profile, bare)) = rest.split_once('.')
            && let Some(index) = self.profiles.iter().position(|p| p == profile)
        {
            return (bare, Some(index));
        }
        (name, None)
    }

    /// Whether `candidate` should replace `current` for the same bare name.
    fn replaces(&self, current: &ConfigValue, candidate: &ConfigValue) -> bool {
        match (self.rank(current), self.rank(candidate)) {
            (Some(current), Some(candidate)) => candidate < current,
            (Some(_), None) => candidate.outranks(current),
            (None, Some(_)) => !current.outranks(candidate),
            (None, None) => false,
        }
    }

    fn rank(&self, value: &ConfigValue) -> Option<usize> {
        let profile = value.profile()?;
        self.profiles.iter().position(|p| p == profile)
    }
}

impl Interceptor for ProfileStage {
    fn name(&self) -> &str {
        "profile"
    }

    fn is_enabled(&self) -> bool {
        !self.profiles.is_empty()
    }

    fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        let (bare, _) = self.classify(name);
        for profile in &self.profiles {
            let profiled_name = format!("{}{}", profiles::prefix(profile), bare);
            let Some(profiled) = lookup_raw(context, &profiled_name)? else {
                continue;
            };
            if let Some(plain) = lookup_raw(context, bare)?
                && plain.outranks(&profiled)
            {
                return context.proceed(bare);
            }
            return Ok(context
                .proceed(&profiled_name)?
                .map(|value| value.with_name(bare).with_profile(profile.as_str())));
        }
        context.proceed(name)
    }

    fn iterate_names(&self, context: &Context<'_>) -> Result<NameSet, ResolveError> {
        let inner = context.iterate_names()?;
        Ok(inner.iter().map(|name| self.classify(name).0.to_string()).collect())
    }

    fn iterate_values(&self, context: &Context<'_>) -> Result<Vec<ConfigValue>, ResolveError> {
        let mut best: BTreeMap<PropertyName, ConfigValue> = BTreeMap::new();
        for value in expressions::without_expansion(|| context.iterate_values())? {
            let candidate = match self.classify(value.name()) {
                (bare, Some(index)) => value.with_name(bare).with_profile(self.profiles[index].as_str()),
                (_, None) => value,
            };
            let key = PropertyName::new(candidate.name());
            match best.get(&key) {
                Some(current) if !self.replaces(current, &candidate) => {}
                _ => {
                    best.insert(key, candidate);
                }
            }
        }
        expand_winners(
            context,
            best.into_values().map(|winner| (winner.name_profiled(), winner)),
        )
    }
}
