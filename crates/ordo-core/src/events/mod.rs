use tracing::{error, info};

use crate::errors::OrdoError;

/// Log that the application started running `command`.
pub fn log_app_startup(command: &str) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        command = command
    );
}

/// Log a failed operation with its stable error code.
pub fn log_app_error(error: &dyn OrdoError) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        code = error.error_code(),
        user_error = error.is_user_error()
    );
}
