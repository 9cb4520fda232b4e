/*!
 * Lock Strategy Traits
 *
 * The capability every pluggable locking strategy provides.
 *
 * # Design: One Capability, Two Dispatch Forms
 *
 * Generic code takes `L: Lockable` and is monomorphized per strategy (no
 * indirection, strategy fixed per instantiation). Heterogeneous collections
 * use `Box<dyn Lockable>` or the `LockStrategy` enum. All three forward to the
 * same concrete implementations, so the acquire/release sequence observed for
 * a given strategy does not depend on how it was dispatched.
 */

use std::sync::Arc;

/// Lock/unlock capability
///
/// Implementations must be:
/// - **Thread-safe**: callable from multiple threads
/// - **Balanced**: every successful `lock`/`try_lock` is paired with one `unlock`
///
/// Prefer `ScopeGuard` over calling these directly.
pub trait Lockable: Send + Sync {
    /// Acquire, blocking until the strategy admits the caller
    fn lock(&self);

    /// Acquire without blocking
    ///
    /// Returns `true` if the caller now holds the lock
    fn try_lock(&self) -> bool;

    /// Release a previous acquisition
    ///
    /// # Safety
    ///
    /// The caller must hold the lock in the current context, acquired through
    /// `lock` or a successful `try_lock` on this same instance.
    unsafe fn unlock(&self);

    /// Strategy name for logging/debugging
    fn name(&self) -> &'static str;
}

/// Strategies that admit at most one holder at a time
///
/// # Safety
///
/// Implementors guarantee that between `lock` returning and the matching
/// `unlock`, no other caller can acquire the same instance. `ThreadSafe`
/// relies on this to hand out `&mut` access to guarded state.
pub unsafe trait MutualExclusion: Lockable {}

impl<L: Lockable + ?Sized> Lockable for &L {
    #[inline]
    fn lock(&self) {
        (**self).lock()
    }

    #[inline]
    fn try_lock(&self) -> bool {
        (**self).try_lock()
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: forwarded contract
        unsafe { (**self).unlock() }
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<L: Lockable + ?Sized> Lockable for Box<L> {
    #[inline]
    fn lock(&self) {
        (**self).lock()
    }

    #[inline]
    fn try_lock(&self) -> bool {
        (**self).try_lock()
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: forwarded contract
        unsafe { (**self).unlock() }
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<L: Lockable + ?Sized> Lockable for Arc<L> {
    #[inline]
    fn lock(&self) {
        (**self).lock()
    }

    #[inline]
    fn try_lock(&self) -> bool {
        (**self).try_lock()
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: forwarded contract
        unsafe { (**self).unlock() }
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// SAFETY: all forward to the same underlying exclusive instance
unsafe impl<L: MutualExclusion + ?Sized> MutualExclusion for &L {}
unsafe impl<L: MutualExclusion + ?Sized> MutualExclusion for Box<L> {}
unsafe impl<L: MutualExclusion + ?Sized> MutualExclusion for Arc<L> {}
