//! Lookup logging.

use tracing::{debug, info};

use crate::interceptors::{Context, Interceptor, ResolveError};
use crate::logging::LOOKUP_TARGET;
use crate::secrets;
use crate::value::ConfigValue;

/// Placeholder logged in place of a secret's value and location.
const REDACTED: &str = "secret";

/// Logs every lookup with the value and where it came from.
///
/// Secret values never reach the log. The lookup is first attempted with
/// secrets locked; a denial marks the name as secret, and the lookup is
/// repeated under the caller's own lock state with the output redacted.
/// Events are emitted under [`LOOKUP_TARGET`].
#[derive(Debug, Clone, Default)]
pub struct LoggingStage;

impl LoggingStage {
    pub fn new() -> Self {
        Self
    }
}

impl Interceptor for LoggingStage {
    fn name(&self) -> &str {
        "logging"
    }

    fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        match secrets::with_locked(|| context.proceed(name)) {
            Ok(Some(value)) => {
                info!(
                    target: LOOKUP_TARGET,
                    event = "core.lookup.resolved",
                    name = name,
                    value = value.value().unwrap_or_default(),
                    location = %value.location()
                );
                Ok(Some(value))
            }
            Ok(None) => {
                info!(target: LOOKUP_TARGET, event = "core.lookup.not_found", name = name);
                Ok(None)
            }
            Err(ResolveError::AccessDenied { .. }) => {
                let result = context.proceed(name);
                if let Ok(Some(_)) = &result {
                    info!(
                        target: LOOKUP_TARGET,
                        event = "core.lookup.resolved",
                        name = name,
                        value = REDACTED,
                        location = REDACTED
                    );
                }
                result
            }
            Err(e) => {
                debug!(target: LOOKUP_TARGET, event = "core.lookup.failed", name = name, error = %e);
                Err(e)
            }
        }
    }
}
