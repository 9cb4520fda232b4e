/*!
 * Instrumented Lock Wrapper
 *
 * Wraps any strategy to record its acquire/release sequence and emit trace
 * events. Used to compare dispatch forms and to audit facade discipline.
 */

use super::traits::{Lockable, MutualExclusion};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

/// One observed lock operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockEvent {
    Acquire(&'static str),
    TryAcquire { strategy: &'static str, acquired: bool },
    Release(&'static str),
}

/// Shared, append-only record of lock events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<LockEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn push(&self, event: LockEvent) {
        self.events.lock().push(event);
    }

    /// Copy of all events so far
    pub fn snapshot(&self) -> Vec<LockEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Number of successful acquisitions (blocking or try)
    pub fn acquisitions(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    LockEvent::Acquire(_) | LockEvent::TryAcquire { acquired: true, .. }
                )
            })
            .count()
    }

    pub fn releases(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, LockEvent::Release(_)))
            .count()
    }
}

/// Wrapper that records every operation of the inner strategy
///
/// # Example
///
/// ```
/// use sync_toolkit::sync::strategy::{ExclusiveLock, Instrumented, LockEvent};
/// use sync_toolkit::ScopeGuard;
///
/// let lock = Instrumented::new(ExclusiveLock::new());
/// let log = lock.log();
/// drop(ScopeGuard::acquire(&lock));
///
/// assert_eq!(
///     log.snapshot(),
///     vec![LockEvent::Acquire("exclusive"), LockEvent::Release("exclusive")]
/// );
/// ```
#[derive(Debug)]
pub struct Instrumented<L> {
    inner: L,
    log: EventLog,
}

impl<L: Lockable> Instrumented<L> {
    pub fn new(inner: L) -> Self {
        Self::with_log(inner, EventLog::new())
    }

    /// Record into an existing log (several locks, one timeline)
    pub fn with_log(inner: L, log: EventLog) -> Self {
        Self { inner, log }
    }

    /// Handle to the event log (shares storage)
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Lockable> Lockable for Instrumented<L> {
    fn lock(&self) {
        self.inner.lock();
        self.log.push(LockEvent::Acquire(self.inner.name()));
        trace!(strategy = self.inner.name(), "lock acquired");
    }

    fn try_lock(&self) -> bool {
        let acquired = self.inner.try_lock();
        self.log.push(LockEvent::TryAcquire {
            strategy: self.inner.name(),
            acquired,
        });
        trace!(strategy = self.inner.name(), acquired, "lock try-acquired");
        acquired
    }

    unsafe fn unlock(&self) {
        // Logged while still held so the log order matches the lock order
        self.log.push(LockEvent::Release(self.inner.name()));
        trace!(strategy = self.inner.name(), "lock released");
        // SAFETY: forwarded contract
        unsafe { self.inner.unlock() }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

// SAFETY: exclusion is provided entirely by the inner strategy
unsafe impl<L: MutualExclusion> MutualExclusion for Instrumented<L> {}
