//! Priority bands for interceptor stages.
//!
//! Higher priority runs first (outermost). The built-in stages sit in the
//! library band so that user interceptors at the default priority run
//! closest to the sources.

pub const PLATFORM: i32 = 1000;
pub const LIBRARY: i32 = 3000;
pub const APPLICATION: i32 = 5000;

/// Priority for user interceptors that do not declare one.
pub const DEFAULT: i32 = 100;

pub const SECRET_KEYS: i32 = LIBRARY + 100;
pub const LOGGING: i32 = LIBRARY + 200;
pub const EXPRESSION: i32 = LIBRARY + 300;
pub const FALLBACK: i32 = LIBRARY + 600;
pub const PROFILE: i32 = LIBRARY + 800;
pub const RELOCATE: i32 = LIBRARY + 1000;
