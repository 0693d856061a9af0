//! Environment variable source.

use std::collections::HashMap;

use super::errors::SourceError;
use super::traits::ConfigSource;
use crate::names::PropertyName;

/// Name reported for values read from the environment.
pub const ENV_SOURCE_NAME: &str = "EnvConfigSource";

/// Ordinal of the environment source.
pub const ENV_SOURCE_ORDINAL: i32 = 300;

/// A snapshot of environment variables taken at construction.
///
/// Lookup order for a property name:
/// 1. The name itself (case, `-` and `_` folded by [`PropertyName`])
/// 2. The name with every character outside `[A-Za-z0-9_]` replaced by `_`
///
/// The second form is what lets `%prod.port` find `_PROD_PORT`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    ordinal: i32,
    variables: HashMap<PropertyName, (String, String)>,
}

impl EnvSource {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Build from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let variables = vars
            .into_iter()
            .map(|(key, value)| {
                let key = key.into();
                (PropertyName::new(key.clone()), (key, value.into()))
            })
            .collect();
        Self {
            ordinal: ENV_SOURCE_ORDINAL,
            variables,
        }
    }

    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        if let Some((_, value)) = self.variables.get(&PropertyName::new(name)) {
            return Some(value);
        }
        let sanitized = sanitize(name);
        if sanitized == name {
            return None;
        }
        self.variables
            .get(&PropertyName::new(sanitized))
            .map(|(_, value)| value.as_str())
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

impl ConfigSource for EnvSource {
    fn name(&self) -> &str {
        ENV_SOURCE_NAME
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn property_names(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.variables.values().map(|(key, _)| key.clone()).collect())
    }

    fn get_value(&self, name: &str) -> Result<Option<String>, SourceError> {
        Ok(self.lookup(name).map(str::to_string))
    }
}
