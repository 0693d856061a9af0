//! Secret handlers for `${handler::secret}` expressions.
//!
//! A reference whose key contains `::` is not a property lookup. The text
//! before `::` names a handler and the text after it is passed to that
//! handler, whose output replaces the reference:
//!
//! ```toml
//! db.password = "${base64::aHVudGVyMg==}"
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;

use crate::interceptors::ResolveError;

/// Decodes the input of a `${name::input}` reference.
pub trait SecretKeysHandler: Send + Sync {
    fn name(&self) -> &str;

    /// Decode `secret`.
    ///
    /// Errors must not include `secret` or the decoded text.
    fn decode(&self, secret: &str) -> Result<String, ResolveError>;
}

/// Decodes standard base64 into UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Handler;

impl SecretKeysHandler for Base64Handler {
    fn name(&self) -> &str {
        "base64"
    }

    fn decode(&self, secret: &str) -> Result<String, ResolveError> {
        let failed = |message: String| ResolveError::SecretDecode {
            handler: self.name().to_string(),
            message,
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| failed(e.to_string()))?;
        String::from_utf8(bytes).map_err(|_| failed("decoded bytes are not UTF-8".to_string()))
    }
}

/// Registered handlers by name. A later registration replaces an earlier
/// one with the same name.
#[derive(Clone, Default)]
pub struct SecretHandlers {
    handlers: HashMap<String, Arc<dyn SecretKeysHandler>>,
}

impl SecretHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn SecretKeysHandler>) {
        self.handlers.insert(handler.name().to_string(), handler);
    }

    /// Decode `secret` with the handler called `handler`.
    ///
    /// `property` is the name whose value holds the reference and is only
    /// used for the error.
    pub fn decode(&self, handler: &str, secret: &str, property: &str) -> Result<String, ResolveError> {
        match self.handlers.get(handler) {
            Some(found) => found.decode(secret),
            None => Err(ResolveError::UnknownSecretHandler {
                handler: handler.to_string(),
                property: property.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for SecretHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SecretHandlers").field("handlers", &names).finish()
    }
}
