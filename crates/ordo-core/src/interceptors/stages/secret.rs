//! Secret key enforcement.

use std::collections::HashSet;

use tracing::warn;

use crate::interceptors::{Context, Interceptor, ResolveError};
use crate::names::{NameSet, PropertyName};
use crate::secrets;
use crate::value::ConfigValue;

/// Denies lookups of secret names while the calling thread is locked and
/// hides them from enumeration.
///
/// Membership ignores a leading `%profile.` segment, so `%prod.db.password`
/// is a secret whenever `db.password` is.
#[derive(Debug, Clone)]
pub struct SecretKeysStage {
    secrets: HashSet<PropertyName>,
}

impl SecretKeysStage {
    pub fn new<I, S>(secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            secrets: secrets
                .into_iter()
                .map(|name| PropertyName::unprofiled(name.as_ref()))
                .collect(),
        }
    }

    pub fn is_secret(&self, name: &str) -> bool {
        self.secrets.contains(&PropertyName::unprofiled(name))
    }
}

impl Interceptor for SecretKeysStage {
    fn name(&self) -> &str {
        "secret-keys"
    }

    fn is_enabled(&self) -> bool {
        !self.secrets.is_empty()
    }

    fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        if secrets::is_locked() && self.is_secret(name) {
            warn!(event = "core.secrets.access_denied", name = name);
            return Err(ResolveError::AccessDenied {
                name: name.to_string(),
            });
        }
        context.proceed(name)
    }

    fn iterate_names(&self, context: &Context<'_>) -> Result<NameSet, ResolveError> {
        let mut names = context.iterate_names()?;
        if secrets::is_locked() {
            names.retain(|name| !self.is_secret(name));
        }
        Ok(names)
    }

    fn iterate_values(&self, context: &Context<'_>) -> Result<Vec<ConfigValue>, ResolveError> {
        let mut values = context.iterate_values()?;
        if secrets::is_locked() {
            values.retain(|value| !self.is_secret(value.name()));
        }
        Ok(values)
    }
}
