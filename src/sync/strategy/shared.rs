/*!
 * Shared Lock Strategy
 *
 * parking_lot raw reader-writer lock. Through `Lockable` it acquires reader
 * mode; writers go through the `WriteLock` view of the same instance.
 */

use super::traits::{Lockable, MutualExclusion};
use parking_lot::lock_api::RawRwLock as RawRwLockApi;
use parking_lot::RawRwLock;
use std::fmt;

/// Many concurrent readers XOR one writer
///
/// parking_lot's rwlock is task-fair: a reader that re-acquires while a writer
/// is queued deadlocks. Do not nest reader scopes on the same instance.
pub struct SharedLock {
    raw: RawRwLock,
}

impl SharedLock {
    pub const fn new() -> Self {
        Self {
            raw: <RawRwLock as RawRwLockApi>::INIT,
        }
    }

    /// Writer-mode view over this lock
    #[inline]
    pub fn write(&self) -> WriteLock<'_> {
        WriteLock { shared: self }
    }

    /// Check whether any reader or writer holds the lock (racy, diagnostics only)
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }
}

impl Default for SharedLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLock")
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl Lockable for SharedLock {
    #[inline]
    fn lock(&self) {
        self.raw.lock_shared();
    }

    #[inline]
    fn try_lock(&self) -> bool {
        self.raw.try_lock_shared()
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: caller holds a shared acquisition per the trait contract
        unsafe { self.raw.unlock_shared() }
    }

    fn name(&self) -> &'static str {
        "shared"
    }
}

/// Writer-mode view of a `SharedLock`
#[derive(Debug, Clone, Copy)]
pub struct WriteLock<'a> {
    shared: &'a SharedLock,
}

impl Lockable for WriteLock<'_> {
    #[inline]
    fn lock(&self) {
        self.shared.raw.lock_exclusive();
    }

    #[inline]
    fn try_lock(&self) -> bool {
        self.shared.raw.try_lock_exclusive()
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: caller holds the exclusive acquisition per the trait contract
        unsafe { self.shared.raw.unlock_exclusive() }
    }

    fn name(&self) -> &'static str {
        "shared_write"
    }
}

// SAFETY: exclusive mode excludes readers and other writers
unsafe impl MutualExclusion for WriteLock<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readers_coexist() {
        let lock = SharedLock::new();
        lock.lock();
        assert!(lock.try_lock());
        assert!(!lock.write().try_lock());
        unsafe {
            lock.unlock();
            lock.unlock();
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_writer_excludes_readers() {
        let lock = SharedLock::new();
        let writer = lock.write();
        writer.lock();
        assert!(!lock.try_lock());
        assert!(!writer.try_lock());
        unsafe { writer.unlock() };
        assert!(lock.try_lock());
        unsafe { lock.unlock() };
    }
}
