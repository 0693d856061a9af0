//! Per-thread boolean flags with guaranteed restore.
//!
//! The secret lock and the expansion switch are both scoped to the calling
//! thread. A [`FlagGuard`] sets a flag and puts the previous value back when
//! dropped, which happens on normal return, on `?` early exit and during
//! panic unwinding alike.

use std::cell::Cell;
use std::marker::PhantomData;
use std::thread::LocalKey;

pub(crate) type Flag = LocalKey<Cell<bool>>;

/// Restores a thread-local flag to its previous value on drop.
///
/// The guard is tied to the thread that created it and is neither `Send`
/// nor `Sync`.
#[must_use = "the flag is restored as soon as the guard is dropped"]
pub struct FlagGuard {
    flag: &'static Flag,
    previous: bool,
    _not_send: PhantomData<*const ()>,
}

impl FlagGuard {
    pub(crate) fn set(flag: &'static Flag, value: bool) -> Self {
        let previous = flag.with(|cell| cell.replace(value));
        Self {
            flag,
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for FlagGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        self.flag.with(|cell| cell.set(previous));
    }
}

pub(crate) fn get(flag: &'static Flag) -> bool {
    flag.with(Cell::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    thread_local! {
        static TEST_FLAG: Cell<bool> = const { Cell::new(true) };
    }

    #[test]
    fn test_guard_restores_previous_value() {
        assert!(get(&TEST_FLAG));
        {
            let _guard = FlagGuard::set(&TEST_FLAG, false);
            assert!(!get(&TEST_FLAG));
        }
        assert!(get(&TEST_FLAG));
    }

    #[test]
    fn test_nested_guards_unwind_in_order() {
        let outer = FlagGuard::set(&TEST_FLAG, false);
        let inner = FlagGuard::set(&TEST_FLAG, true);
        assert!(get(&TEST_FLAG));
        drop(inner);
        assert!(!get(&TEST_FLAG));
        drop(outer);
        assert!(get(&TEST_FLAG));
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let result = std::panic::catch_unwind(|| {
            let _guard = FlagGuard::set(&TEST_FLAG, false);
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(get(&TEST_FLAG));
    }
}
