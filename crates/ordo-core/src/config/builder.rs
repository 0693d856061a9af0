use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use super::LOG_VALUES_KEY;
use super::errors::BuildError;
use super::types::Config;
use crate::interceptors::stages::{
    ExpressionStage, LoggingStage, NameMappingStage, ProfileStage, SecretKeysStage,
};
use crate::interceptors::{Chain, Context, Interceptor, InterceptorFactory, Stage, priorities};
use crate::profiles::{PROFILE_KEY, parse_profiles};
use crate::registry::SourceRegistry;
use crate::secrets::{SecretHandlers, SecretKeysHandler};
use crate::sources::{
    ConfigSource, EnvSource, MapSource, SourceContext, SourceFactory, TomlFileSource,
};

#[derive(Debug, Clone)]
struct TomlFile {
    path: PathBuf,
    ordinal: i32,
    optional: bool,
}

#[derive(Debug, Clone, Copy)]
enum Builtin {
    SecretKeys,
    Logging,
    Expression,
    Fallback,
    Profile,
    Relocate,
}

impl Builtin {
    const ALL: [Builtin; 6] = [
        Builtin::SecretKeys,
        Builtin::Logging,
        Builtin::Expression,
        Builtin::Fallback,
        Builtin::Profile,
        Builtin::Relocate,
    ];

    fn priority(self) -> i32 {
        match self {
            Builtin::SecretKeys => priorities::SECRET_KEYS,
            Builtin::Logging => priorities::LOGGING,
            Builtin::Expression => priorities::EXPRESSION,
            Builtin::Fallback => priorities::FALLBACK,
            Builtin::Profile => priorities::PROFILE,
            Builtin::Relocate => priorities::RELOCATE,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Builtin::SecretKeys => "secret-keys",
            Builtin::Logging => "logging",
            Builtin::Expression => "expression",
            Builtin::Fallback => "fallback",
            Builtin::Profile => "profile",
            Builtin::Relocate => "relocate",
        }
    }
}

enum Candidate<'b> {
    Builtin(Builtin),
    Instance(Arc<dyn Interceptor>),
    Factory(&'b dyn InterceptorFactory),
}

impl Candidate<'_> {
    fn priority(&self) -> i32 {
        match self {
            Candidate::Builtin(builtin) => builtin.priority(),
            Candidate::Instance(interceptor) => interceptor.priority(),
            Candidate::Factory(factory) => factory.priority(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Candidate::Builtin(builtin) => builtin.name(),
            Candidate::Instance(interceptor) => interceptor.name(),
            Candidate::Factory(factory) => factory.name(),
        }
    }
}

/// Assembles a [`Config`] from sources, interceptors and settings.
///
/// # Build order
///
/// 1. Eager sources, defaults and TOML files are loaded.
/// 2. Source factories run in ascending priority against a bootstrap chain
///    holding the eager sources with the expression and profile stages.
/// 3. Every stage candidate is sorted by ascending priority and created in
///    that order, each seeing a chain of the stages already created.
///    Candidates that turn out disabled are left out.
///
/// Any failure along the way fails the whole build.
pub struct ConfigBuilder {
    sources: Vec<Arc<dyn ConfigSource>>,
    defaults: Vec<(String, String)>,
    toml_files: Vec<TomlFile>,
    source_factories: Vec<Box<dyn SourceFactory>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    interceptor_factories: Vec<Box<dyn InterceptorFactory>>,
    profiles: Option<Vec<String>>,
    secret_keys: Vec<String>,
    secret_handlers: SecretHandlers,
    relocations: Vec<(String, String)>,
    fallbacks: Vec<(String, String)>,
    expansion: bool,
    lookup_logging: Option<bool>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            defaults: Vec::new(),
            toml_files: Vec::new(),
            source_factories: Vec::new(),
            interceptors: Vec::new(),
            interceptor_factories: Vec::new(),
            profiles: None,
            secret_keys: Vec::new(),
            secret_handlers: SecretHandlers::new(),
            relocations: Vec::new(),
            fallbacks: Vec::new(),
            expansion: true,
            lookup_logging: None,
        }
    }

    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn with_sources<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ConfigSource>>,
    {
        self.sources.extend(sources);
        self
    }

    /// Add a value to the defaults source, which every other source outranks.
    pub fn with_default_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.push((name.into(), value.into()));
        self
    }

    pub fn with_default_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.defaults
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a snapshot of the process environment.
    pub fn with_env(self) -> Self {
        self.with_source(EnvSource::from_process())
    }

    /// Add a TOML file that must exist.
    pub fn with_toml_file(mut self, path: impl Into<PathBuf>, ordinal: i32) -> Self {
        self.toml_files.push(TomlFile {
            path: path.into(),
            ordinal,
            optional: false,
        });
        self
    }

    /// Add a TOML file that is skipped when missing.
    pub fn with_optional_toml_file(mut self, path: impl Into<PathBuf>, ordinal: i32) -> Self {
        self.toml_files.push(TomlFile {
            path: path.into(),
            ordinal,
            optional: true,
        });
        self
    }

    pub fn with_source_factory(mut self, factory: impl SourceFactory + 'static) -> Self {
        self.source_factories.push(Box::new(factory));
        self
    }

    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_interceptor_factory(mut self, factory: impl InterceptorFactory + 'static) -> Self {
        self.interceptor_factories.push(Box::new(factory));
        self
    }

    /// Set the active profiles, first has precedence.
    ///
    /// Without this the profiles are read from `ordo.profile`.
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut active: Vec<String> = Vec::new();
        for profile in profiles.into_iter().map(Into::into) {
            if !profile.is_empty() && !active.contains(&profile) {
                active.push(profile);
            }
        }
        self.profiles = Some(active);
        self
    }

    pub fn with_secret_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secret_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Register a handler for `${name::input}` references.
    pub fn with_secret_handler(mut self, handler: impl SecretKeysHandler + 'static) -> Self {
        self.secret_handlers.register(Arc::new(handler));
        self
    }

    /// Map old names to new ones, consulting the new name first.
    pub fn with_relocations<I, K, V>(mut self, relocations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.relocations
            .extend(relocations.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Map names to fallbacks consulted when the name itself has no value.
    pub fn with_fallbacks<I, K, V>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fallbacks
            .extend(fallbacks.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Turn `${...}` expansion on or off. On by default.
    pub fn with_expansion(mut self, enabled: bool) -> Self {
        self.expansion = enabled;
        self
    }

    /// Force lookup logging on or off, overriding `ordo.log.values`.
    pub fn with_lookup_logging(mut self, enabled: bool) -> Self {
        self.lookup_logging = Some(enabled);
        self
    }

    pub fn build(mut self) -> Result<Config, BuildError> {
        info!(
            event = "core.config.build_started",
            sources = self.sources.len(),
            files = self.toml_files.len(),
            source_factories = self.source_factories.len(),
            interceptors = self.interceptors.len() + self.interceptor_factories.len()
        );

        let mut sources = std::mem::take(&mut self.sources);
        if !self.defaults.is_empty() {
            sources.push(Arc::new(MapSource::defaults(std::mem::take(&mut self.defaults))));
        }
        for file in &self.toml_files {
            let loaded = if file.optional {
                TomlFileSource::load_optional(&file.path, file.ordinal)?
            } else {
                Some(TomlFileSource::load_with_ordinal(&file.path, file.ordinal)?)
            };
            if let Some(source) = loaded {
                sources.push(Arc::new(source));
            }
        }

        let sources = self.run_source_factories(sources)?;
        let registry = SourceRegistry::new(sources);
        let source_count = registry.len();
        let (chain, profiles) = self.assemble(registry)?;

        info!(
            event = "core.config.build_completed",
            sources = source_count,
            stages = ?chain.stages(),
            profiles = ?profiles
        );

        Ok(Config::new(
            chain,
            profiles,
            SecretKeysStage::new(&self.secret_keys),
        ))
    }

    fn run_source_factories(
        &self,
        mut sources: Vec<Arc<dyn ConfigSource>>,
    ) -> Result<Vec<Arc<dyn ConfigSource>>, BuildError> {
        if self.source_factories.is_empty() {
            return Ok(sources);
        }

        let mut bootstrap = Chain::new(SourceRegistry::new(sources.clone()));
        if self.expansion {
            let stage = ExpressionStage::with_handlers(self.secret_handlers.clone());
            bootstrap.push(priorities::EXPRESSION, Stage::Expression(stage));
        }
        let profiles = match &self.profiles {
            Some(profiles) => profiles.clone(),
            None => read_profiles(&bootstrap.context())?,
        };
        if !profiles.is_empty() {
            bootstrap.push(priorities::PROFILE, Stage::Profile(ProfileStage::new(profiles.clone())));
        }

        let mut factories: Vec<&dyn SourceFactory> =
            self.source_factories.iter().map(|f| f.as_ref()).collect();
        factories.sort_by_key(|factory| factory.priority());

        for factory in factories {
            let context = SourceContext::new(bootstrap.context(), &profiles);
            let created = factory.sources(&context).inspect_err(|e| {
                error!(
                    event = "core.sources.factory_failed",
                    factory = factory.name(),
                    error = %e
                );
            })?;
            info!(
                event = "core.sources.factory_completed",
                factory = factory.name(),
                sources = created.len()
            );
            sources.extend(created.into_iter().map(Arc::from));
        }
        Ok(sources)
    }

    fn assemble(&self, registry: SourceRegistry) -> Result<(Chain, Vec<String>), BuildError> {
        let mut candidates: Vec<Candidate<'_>> = Builtin::ALL.into_iter().map(Candidate::Builtin).collect();
        candidates.extend(self.interceptors.iter().cloned().map(Candidate::Instance));
        candidates.extend(
            self.interceptor_factories
                .iter()
                .map(|factory| Candidate::Factory(factory.as_ref())),
        );
        // stable: equal priorities keep insertion order, built-ins innermost
        candidates.sort_by_key(Candidate::priority);

        let mut chain = Chain::new(registry);
        let mut profiles = self.profiles.clone().unwrap_or_default();

        for candidate in candidates {
            let priority = candidate.priority();
            let stage = {
                let context = chain.context();
                match &candidate {
                    Candidate::Builtin(builtin) => self.builtin_stage(*builtin, &context, &mut profiles)?,
                    Candidate::Instance(interceptor) => Some(Stage::Custom(Arc::clone(interceptor))),
                    Candidate::Factory(factory) => Some(Stage::Custom(Arc::from(factory.create(&context)?))),
                }
            };
            match stage {
                Some(stage) if stage.is_enabled() => chain.push(priority, stage),
                _ => debug!(
                    event = "core.chain.stage_skipped",
                    stage = candidate.name(),
                    priority = priority
                ),
            }
        }

        Ok((chain, profiles))
    }

    fn builtin_stage(
        &self,
        builtin: Builtin,
        context: &Context<'_>,
        profiles: &mut Vec<String>,
    ) -> Result<Option<Stage>, BuildError> {
        let stage = match builtin {
            Builtin::SecretKeys => Stage::SecretKeys(SecretKeysStage::new(&self.secret_keys)),
            Builtin::Logging => {
                let enabled = match self.lookup_logging {
                    Some(enabled) => enabled,
                    None => match context.proceed(LOG_VALUES_KEY)? {
                        Some(value) => parse_bool(LOG_VALUES_KEY, value.value().unwrap_or_default())?,
                        None => false,
                    },
                };
                if !enabled {
                    return Ok(None);
                }
                Stage::Logging(LoggingStage::new())
            }
            Builtin::Expression => {
                if !self.expansion {
                    return Ok(None);
                }
                Stage::Expression(ExpressionStage::with_handlers(self.secret_handlers.clone()))
            }
            Builtin::Fallback => Stage::Mapping(NameMappingStage::fallback(self.fallbacks.iter().cloned())),
            Builtin::Profile => {
                if self.profiles.is_none() {
                    *profiles = read_profiles(context)?;
                }
                Stage::Profile(ProfileStage::new(profiles.clone()))
            }
            Builtin::Relocate => Stage::Mapping(NameMappingStage::relocate(self.relocations.iter().cloned())),
        };
        Ok(Some(stage))
    }
}

fn read_profiles(context: &Context<'_>) -> Result<Vec<String>, BuildError> {
    Ok(context
        .proceed(PROFILE_KEY)?
        .and_then(|value| value.value().map(parse_profiles))
        .unwrap_or_default())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, BuildError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        other => Err(BuildError::InvalidSetting {
            name: name.to_string(),
            message: format!("expected true or false, got '{}'", other),
        }),
    }
}
