/*!
 * Thread-Safe Facade
 *
 * Public operations lock, internal operations don't.
 *
 * # Design: Visibility Enforces the Discipline
 *
 * `ThreadSafe<T, L>` never hands out `&T` or `&mut T` through a shared
 * reference except inside `with`/`run`, which acquire the lock exactly once
 * around the call. Code that implements a shared object therefore splits
 * naturally into:
 *
 * 1. external operations: methods on the wrapper type that call `with`
 * 2. internal operations: functions over `&mut T` that assume the lock is held
 *
 * Internal operations cannot reach the lock. If one calls an external
 * operation of the same object anyway, that is a reentrant acquisition, which
 * `ExclusiveLock` detects and turns into a panic instead of a deadlock.
 *
 * Entry points are inherent methods, so no trait impl can override them and
 * skip the lock. Customization goes through `FacadeOp`, whose hook only ever
 * runs with the lock held.
 *
 * State that outlives one instance (a `static`) needs a lock with the same
 * scope: `ThreadSafe::new` is `const` so the lock can live in the static
 * alongside the state.
 */

use super::scope::ScopeGuard;
use crate::sync::strategy::{ExclusiveLock, MutualExclusion};
use std::cell::UnsafeCell;
use std::fmt;

/// Overridable operation run under the facade lock
///
/// Implement this (or pass a closure to `with`) to customize behavior. The
/// facade decides when the lock is taken; the hook cannot opt out.
pub trait FacadeOp<T> {
    type Output;

    /// Runs with the lock held. Must not call entry points of the same facade.
    fn apply(&mut self, state: &mut T) -> Self::Output;
}

impl<T, R, F: FnMut(&mut T) -> R> FacadeOp<T> for F {
    type Output = R;

    fn apply(&mut self, state: &mut T) -> R {
        self(state)
    }
}

/// State reachable only through a locking entry point
///
/// `L` must provide real mutual exclusion: a facade over `NoOpLock` or a
/// reader-mode `SharedLock` does not compile.
///
/// ```compile_fail
/// use sync_toolkit::guard::ThreadSafe;
/// use sync_toolkit::sync::strategy::NoOpLock;
///
/// let racy = ThreadSafe::with_lock(0u32, NoOpLock::new());
/// ```
///
/// Shared references never reach the state without the lock:
///
/// ```compile_fail
/// use sync_toolkit::guard::ThreadSafe;
///
/// let counter = ThreadSafe::new(0u32);
/// let shared = &counter;
/// let peek: &u32 = &*shared;
/// ```
pub struct ThreadSafe<T, L: MutualExclusion = ExclusiveLock> {
    lock: L,
    state: UnsafeCell<T>,
}

// SAFETY: `state` is only accessed while `lock` is held, and `L` guarantees
// a single holder. `T: Send` because whichever thread holds the lock gets `&mut T`.
unsafe impl<T: Send, L: MutualExclusion> Sync for ThreadSafe<T, L> {}

impl<T> ThreadSafe<T, ExclusiveLock> {
    pub const fn new(state: T) -> Self {
        Self {
            lock: ExclusiveLock::new(),
            state: UnsafeCell::new(state),
        }
    }
}

impl<T, L: MutualExclusion> ThreadSafe<T, L> {
    pub const fn with_lock(state: T, lock: L) -> Self {
        Self {
            lock,
            state: UnsafeCell::new(state),
        }
    }

    /// Locking entry point: acquire once, run `op`, release
    #[inline]
    pub fn with<R>(&self, op: impl FnOnce(&mut T) -> R) -> R {
        let _guard = ScopeGuard::acquire(&self.lock);
        // SAFETY: the lock is held until `_guard` drops and `L` admits one holder
        let state = unsafe { &mut *self.state.get() };
        op(state)
    }

    /// Locking entry point for a `FacadeOp` hook
    #[inline]
    pub fn run<O: FacadeOp<T>>(&self, mut op: O) -> O::Output {
        self.with(|state| op.apply(state))
    }

    /// Like `with`, but returns `None` instead of blocking
    pub fn try_with<R>(&self, op: impl FnOnce(&mut T) -> R) -> Option<R> {
        let _guard = ScopeGuard::try_acquire(&self.lock)?;
        // SAFETY: as in `with`
        let state = unsafe { &mut *self.state.get() };
        Some(op(state))
    }

    /// Exclusive borrow proves no other holder; no lock needed
    pub fn get_mut(&mut self) -> &mut T {
        self.state.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.state.into_inner()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.lock.name()
    }
}

impl<T: Default> Default for ThreadSafe<T, ExclusiveLock> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, L: MutualExclusion> fmt::Debug for ThreadSafe<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadSafe")
            .field("strategy", &self.lock.name())
            .finish_non_exhaustive()
    }
}
