//! Secret key locking.
//!
//! Names registered as secrets resolve only while the current thread has
//! unlocked them. The lock is per thread and defaults to locked, so a new
//! thread can never inherit an unlocked state.
//!
//! ```
//! use ordo_core::secrets;
//!
//! assert!(secrets::is_locked());
//! secrets::with_unlocked(|| assert!(!secrets::is_locked()));
//! assert!(secrets::is_locked());
//! ```

mod handlers;

use std::cell::Cell;

pub use handlers::{Base64Handler, SecretHandlers, SecretKeysHandler};

use crate::scope::{self, FlagGuard};

thread_local! {
    static LOCKED: Cell<bool> = const { Cell::new(true) };
}

/// Whether secret keys are locked on the current thread.
pub fn is_locked() -> bool {
    scope::get(&LOCKED)
}

/// Unlock secrets until the returned guard is dropped.
pub fn unlock() -> FlagGuard {
    FlagGuard::set(&LOCKED, false)
}

/// Lock secrets until the returned guard is dropped, even inside an unlocked scope.
pub fn lock() -> FlagGuard {
    FlagGuard::set(&LOCKED, true)
}

/// Run `f` with secrets readable on this thread.
///
/// The lock state in effect before the call is restored afterwards, including
/// when `f` panics or an outer scope was already unlocked.
pub fn with_unlocked<T>(f: impl FnOnce() -> T) -> T {
    let _guard = unlock();
    f()
}

/// Run `f` with secrets locked on this thread.
pub fn with_locked<T>(f: impl FnOnce() -> T) -> T {
    let _guard = lock();
    f()
}
