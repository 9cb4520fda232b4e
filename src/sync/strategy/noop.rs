/*!
 * No-Op Lock Strategy
 *
 * For contexts that are provably single-threaded. Every call is a no-op, so
 * generic code instantiated with this strategy compiles down to no locking
 * at all.
 */

use super::traits::Lockable;

/// Lock that never blocks and never excludes
///
/// Does not implement `MutualExclusion`: it cannot back a `ThreadSafe` facade.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoOpLock;

impl NoOpLock {
    pub const fn new() -> Self {
        Self
    }
}

impl Lockable for NoOpLock {
    #[inline(always)]
    fn lock(&self) {}

    #[inline(always)]
    fn try_lock(&self) -> bool {
        true
    }

    #[inline(always)]
    unsafe fn unlock(&self) {}

    fn name(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_admits_unlimited_holders() {
        let lock = NoOpLock::new();
        lock.lock();
        lock.lock();
        assert!(lock.try_lock());
        unsafe {
            lock.unlock();
            lock.unlock();
            lock.unlock();
        }
        assert_eq!(lock.name(), "noop");
    }
}
