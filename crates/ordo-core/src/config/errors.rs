use crate::errors::OrdoError;
use crate::interceptors::ResolveError;
use crate::sources::SourceError;

/// Errors raised while assembling a [`Config`](super::Config).
///
/// Any failure aborts the build; no partially built config is returned.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Factory '{factory}' failed: {message}")]
    Factory { factory: String, message: String },

    #[error("Invalid value for '{name}': {message}")]
    InvalidSetting { name: String, message: String },
}

impl OrdoError for BuildError {
    fn error_code(&self) -> &'static str {
        match self {
            BuildError::Source(e) => e.error_code(),
            BuildError::Resolve(e) => e.error_code(),
            BuildError::Factory { .. } => "FACTORY_FAILED",
            BuildError::InvalidSetting { .. } => "INVALID_SETTING",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            BuildError::Source(e) => e.is_user_error(),
            BuildError::Resolve(e) => e.is_user_error(),
            BuildError::Factory { .. } => false,
            BuildError::InvalidSetting { .. } => true,
        }
    }
}
