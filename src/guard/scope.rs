/*!
 * Scope Guard
 *
 * Binds one acquisition of a `Lockable` to a lexical scope
 */

use super::traits::Guard;
use super::GuardMetadata;
use crate::sync::strategy::Lockable;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

/// Scope-bound lock acquisition
///
/// Acquired exactly once in `acquire`, released exactly once in `Drop`,
/// whether the scope ends normally, through `?`, or by unwinding.
///
/// Not `Clone` (a second release would be unbalanced) and not `Send` (some
/// strategies must be released by the thread that acquired them).
///
/// # Precondition
///
/// Nesting guards over distinct locks is fine. Nesting over the same
/// non-reentrant lock is a contract violation; `ExclusiveLock` panics,
/// other strategies may deadlock.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ScopeGuard<'a, L: Lockable + ?Sized> {
    lock: &'a L,
    metadata: GuardMetadata,
    _not_send: PhantomData<*const ()>,
}

impl<'a, L: Lockable + ?Sized> ScopeGuard<'a, L> {
    /// Lock `lock`, blocking as its strategy requires
    #[inline]
    pub fn acquire(lock: &'a L) -> Self {
        lock.lock();
        Self::held(lock)
    }

    /// Lock `lock` if that is possible without blocking
    #[inline]
    pub fn try_acquire(lock: &'a L) -> Option<Self> {
        if lock.try_lock() {
            Some(Self::held(lock))
        } else {
            None
        }
    }

    #[inline]
    fn held(lock: &'a L) -> Self {
        Self {
            lock,
            metadata: GuardMetadata::new(lock.name()),
            _not_send: PhantomData,
        }
    }

    /// Name of the guarded strategy
    #[inline]
    pub fn strategy_name(&self) -> &'static str {
        self.lock.name()
    }
}

impl<L: Lockable + ?Sized> Guard for ScopeGuard<'_, L> {
    fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }
}

impl<L: Lockable + ?Sized> Drop for ScopeGuard<'_, L> {
    fn drop(&mut self) {
        trace!(
            strategy = self.metadata.resource_type,
            held_us = self.metadata.lifetime_micros(),
            "scope guard released"
        );
        // SAFETY: acquired in `acquire`/`try_acquire`, released only here
        unsafe { self.lock.unlock() }
    }
}

impl<L: Lockable + ?Sized> fmt::Debug for ScopeGuard<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("strategy", &self.lock.name())
            .field("held_for", &self.held_for())
            .finish()
    }
}
