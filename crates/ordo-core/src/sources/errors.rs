//! Source-specific error types.

use crate::errors::OrdoError;

/// Errors raised while loading or reading a configuration source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read config source '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config source '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Config source '{source_name}' failed: {message}")]
    Lookup {
        source_name: String,
        message: String,
    },
}

impl OrdoError for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            SourceError::Io { .. } => "SOURCE_IO_ERROR",
            SourceError::Parse { .. } => "SOURCE_PARSE_ERROR",
            SourceError::Lookup { .. } => "SOURCE_LOOKUP_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, SourceError::Parse { .. })
    }
}
