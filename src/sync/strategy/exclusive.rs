/*!
 * Exclusive Lock Strategy
 *
 * parking_lot raw mutex with owner tracking. Owner tracking turns the
 * silent self-deadlock of a reentrant acquisition into an immediate panic.
 */

use super::traits::{Lockable, MutualExclusion};
use crate::errors::SyncError;
use parking_lot::lock_api::RawMutex as RawMutexApi;
use parking_lot::RawMutex;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Non-zero identifier unique to the calling thread
///
/// Drawn once per thread from a global counter and never reused, so a thread
/// that exits while holding a lock cannot be mistaken for a later thread.
#[inline]
pub(crate) fn current_thread_id() -> usize {
    static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
    thread_local!(static ID: usize = NEXT_ID.fetch_add(1, Ordering::Relaxed));
    ID.with(|id| *id)
}

/// At most one holder at any time
///
/// # Precondition
///
/// Not reentrant. `lock()` from the thread that already holds the lock panics
/// with `SyncError::ReentrantLock`; `try_lock()` from that thread returns
/// `false`.
pub struct ExclusiveLock {
    raw: RawMutex,
    /// Thread id of the current holder (0 when free)
    owner: AtomicUsize,
}

impl ExclusiveLock {
    /// Create an unlocked instance (usable in `static` items)
    pub const fn new() -> Self {
        Self {
            raw: <RawMutex as RawMutexApi>::INIT,
            owner: AtomicUsize::new(0),
        }
    }

    /// Check whether any thread holds the lock (racy, diagnostics only)
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }

    /// Check whether the calling thread is the holder
    ///
    /// Only the holder writes its own id and ids are never reused, so a match
    /// cannot be a stale read left by another thread.
    #[inline]
    pub fn is_held_by_current_thread(&self) -> bool {
        self.owner.load(Ordering::Relaxed) == current_thread_id()
    }
}

impl Default for ExclusiveLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExclusiveLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusiveLock")
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl Lockable for ExclusiveLock {
    fn lock(&self) {
        let me = current_thread_id();
        if self.owner.load(Ordering::Relaxed) == me {
            let err = SyncError::ReentrantLock {
                strategy: self.name().to_string(),
            };
            tracing::error!(strategy = self.name(), "reentrant lock acquisition");
            panic!("{}", err);
        }

        self.raw.lock();
        self.owner.store(me, Ordering::Relaxed);
    }

    fn try_lock(&self) -> bool {
        if self.raw.try_lock() {
            self.owner.store(current_thread_id(), Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    unsafe fn unlock(&self) {
        self.owner.store(0, Ordering::Relaxed);
        // SAFETY: caller holds the lock per the trait contract
        unsafe { self.raw.unlock() }
    }

    fn name(&self) -> &'static str {
        "exclusive"
    }
}

// SAFETY: RawMutex admits a single holder
unsafe impl MutualExclusion for ExclusiveLock {}
