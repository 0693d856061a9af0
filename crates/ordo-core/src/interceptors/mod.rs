//! The interceptor chain.
//!
//! Every lookup passes through a chain of stages ordered by priority, highest
//! first, before reaching the [`SourceRegistry`](crate::registry::SourceRegistry).
//! The built-in stages, outermost first:
//!
//! | Stage       | Priority | Enabled when                     |
//! |-------------|----------|----------------------------------|
//! | relocate    | 4000     | relocations configured           |
//! | profile     | 3800     | at least one active profile      |
//! | fallback    | 3600     | fallbacks configured             |
//! | expression  | 3300     | expansion not turned off         |
//! | logging     | 3200     | `ordo.log.values=true`           |
//! | secret-keys | 3100     | at least one secret key          |
//!
//! User interceptors default to priority 100 and so run closest to the
//! sources.

mod context;
mod errors;
pub mod priorities;
mod stage;
pub mod stages;
mod traits;

pub use context::{Chain, Context, MAX_DEPTH};
pub use errors::ResolveError;
pub use stage::Stage;
pub use traits::{Interceptor, InterceptorFactory};
