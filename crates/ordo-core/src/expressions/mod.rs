//! Property expressions.
//!
//! A value may reference other properties with `${name}` or
//! `${name:default}`. References are resolved through the full pipeline, so
//! they see profiles, name mappings and the secret lock like any other
//! lookup.
//!
//! Expansion can be switched off for the current thread with
//! [`without_expansion`], which is how raw values are read.

mod parser;

pub use parser::{Segment, evaluate, parse};

use std::cell::Cell;

use crate::scope::{self, FlagGuard};

thread_local! {
    static EXPANSION_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Whether expansion is enabled on the current thread.
pub fn is_enabled() -> bool {
    scope::get(&EXPANSION_ENABLED)
}

/// Disable expansion until the returned guard is dropped.
pub fn disable() -> FlagGuard {
    FlagGuard::set(&EXPANSION_ENABLED, false)
}

/// Run `f` with expansion disabled on this thread.
///
/// The previous setting is restored when `f` returns or panics.
pub fn without_expansion<T>(f: impl FnOnce() -> T) -> T {
    let _guard = disable();
    f()
}
