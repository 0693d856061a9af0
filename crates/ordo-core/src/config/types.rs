use serde::Serialize;

use super::builder::ConfigBuilder;
use crate::expressions;
use crate::interceptors::stages::SecretKeysStage;
use crate::interceptors::{Chain, ResolveError};
use crate::value::ConfigValue;

/// A source as listed by [`Config::sources`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub ordinal: i32,
}

/// A stage as listed by [`Config::stages`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    pub name: String,
    pub priority: i32,
}

/// The assembled configuration.
///
/// A `Config` is immutable after build and can be shared across threads.
/// Per-call behavior such as the secret lock and expansion switch comes from
/// the calling thread, never from the config itself.
pub struct Config {
    chain: Chain,
    profiles: Vec<String>,
    secret_keys: SecretKeysStage,
}

impl Config {
    pub(crate) fn new(chain: Chain, profiles: Vec<String>, secret_keys: SecretKeysStage) -> Self {
        Self {
            chain,
            profiles,
            secret_keys,
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Resolve `name` through the full chain.
    pub fn get_config_value(&self, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        self.chain.context().proceed(name)
    }

    pub fn get_value(&self, name: &str) -> Result<Option<String>, ResolveError> {
        Ok(self
            .get_config_value(name)?
            .and_then(|value| value.value().map(str::to_string)))
    }

    /// Resolve `name` with expression expansion off.
    pub fn get_raw_value(&self, name: &str) -> Result<Option<String>, ResolveError> {
        expressions::without_expansion(|| self.get_value(name))
    }

    /// Every visible property name, deduplicated and sorted by canonical form.
    pub fn property_names(&self) -> Result<Vec<String>, ResolveError> {
        Ok(self.chain.context().iterate_names()?.into_vec())
    }

    /// One resolved value per visible property name.
    pub fn values(&self) -> Result<Vec<ConfigValue>, ResolveError> {
        self.chain.context().iterate_values()
    }

    /// Active profiles, highest precedence first.
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Sources in priority order.
    pub fn sources(&self) -> Vec<SourceInfo> {
        self.chain
            .registry()
            .sources()
            .map(|source| SourceInfo {
                name: source.name().to_string(),
                ordinal: source.ordinal(),
            })
            .collect()
    }

    /// Active stages, outermost first.
    pub fn stages(&self) -> Vec<StageInfo> {
        self.chain
            .stages()
            .into_iter()
            .map(|(name, priority)| StageInfo {
                name: name.to_string(),
                priority,
            })
            .collect()
    }

    pub fn is_secret(&self, name: &str) -> bool {
        self.secret_keys.is_secret(name)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("sources", self.chain.registry())
            .field("stages", &self.chain.stages())
            .field("profiles", &self.profiles)
            .finish()
    }
}
