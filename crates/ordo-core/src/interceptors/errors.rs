use crate::errors::OrdoError;
use crate::sources::SourceError;

/// Errors raised while resolving a name through the interceptor chain.
///
/// No variant carries a resolved value. Secret values must never reach an
/// error message.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Not allowed to access secret key '{name}'")]
    AccessDenied { name: String },

    #[error("Expression expansion for '{name}' exceeded the maximum depth")]
    ExpansionTooDeep { name: String },

    #[error("Property '{reference}' referenced by '{property}' is not defined")]
    MissingReference { reference: String, property: String },

    #[error("No secret handler named '{handler}' for '{property}'")]
    UnknownSecretHandler { handler: String, property: String },

    #[error("Secret handler '{handler}' could not decode its input: {message}")]
    SecretDecode { handler: String, message: String },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Interceptor '{stage}' failed: {message}")]
    Interceptor { stage: String, message: String },
}

impl OrdoError for ResolveError {
    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::AccessDenied { .. } => "SECRET_ACCESS_DENIED",
            ResolveError::ExpansionTooDeep { .. } => "EXPANSION_TOO_DEEP",
            ResolveError::MissingReference { .. } => "MISSING_REFERENCE",
            ResolveError::UnknownSecretHandler { .. } => "SECRET_HANDLER_NOT_FOUND",
            ResolveError::SecretDecode { .. } => "SECRET_DECODE_FAILED",
            ResolveError::Source(e) => e.error_code(),
            ResolveError::Interceptor { .. } => "INTERCEPTOR_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ResolveError::AccessDenied { .. }
            | ResolveError::ExpansionTooDeep { .. }
            | ResolveError::MissingReference { .. }
            | ResolveError::UnknownSecretHandler { .. }
            | ResolveError::SecretDecode { .. } => true,
            ResolveError::Source(e) => e.is_user_error(),
            ResolveError::Interceptor { .. } => false,
        }
    }
}
