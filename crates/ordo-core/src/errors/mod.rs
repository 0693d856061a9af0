use std::error::Error;

/// Base trait for all pipeline errors
pub trait OrdoError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error was caused by caller input rather than the system
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the pipeline
pub type OrdoResult<T> = Result<T, Box<dyn OrdoError>>;
