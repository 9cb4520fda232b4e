/*!
 * RAII Lock Guards
 *
 * Scope-bound lock acquisition and the thread-safe facade built on it.
 *
 * ## Design Principles
 *
 * 1. **Scope-Bound**: acquire in the constructor, release in `Drop`, on every
 *    exit path including panics
 * 2. **Strategy-Agnostic**: guards work over any `Lockable`, statically or
 *    dynamically dispatched
 * 3. **Structural Discipline**: guarded state is only reachable through a
 *    locking entry point
 *
 * ## Guard Types
 *
 * - **ScopeGuard**: holds one `Lockable` for a lexical scope
 * - **ThreadSafe**: state plus lock, with `with`/`run` as the only shared
 *   entry points
 *
 * ## Example
 *
 * ```rust
 * use sync_toolkit::guard::{ScopeGuard, ThreadSafe};
 * use sync_toolkit::sync::strategy::ExclusiveLock;
 *
 * let lock = ExclusiveLock::new();
 * {
 *     let _guard = ScopeGuard::acquire(&lock);
 *     // critical section
 * } // released here
 *
 * let counter = ThreadSafe::new(0u64);
 * counter.with(|n| *n += 1);
 * assert_eq!(counter.with(|n| *n), 1);
 * ```
 */

mod facade;
mod scope;
mod traits;

pub use facade::{FacadeOp, ThreadSafe};
pub use scope::ScopeGuard;
pub use traits::Guard;

use std::time::{Duration, Instant};

/// Guard metadata for observability
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub creation_time: Instant,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            creation_time: Instant::now(),
        }
    }

    #[inline]
    pub fn lifetime(&self) -> Duration {
        self.creation_time.elapsed()
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.lifetime().as_micros() as u64
    }
}
