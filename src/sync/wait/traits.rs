/*!
 * Wait/Notify Traits
 *
 * Core abstractions for predicate-guarded waiting.
 *
 * # Design: Interchangeable Readiness Sources
 *
 * `ReadySignal` is implemented by both notification styles: push (state
 * mutated under a lock, then a condvar notify) and pull (an atomic flag the
 * waiter polls). `ReadyFlag` dispatches between them by enum, so callers can
 * swap styles from configuration without touching call sites.
 */

use std::time::{Duration, Instant};

/// Result of a wake operation
///
/// Compact representation (single usize) for efficient returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeResult {
    /// Successfully woke N waiters (N >= 1)
    Woken(usize),
    /// No waiters were blocked (or the style never blocks)
    NoWaiters,
}

impl WakeResult {
    #[inline(always)]
    pub(crate) fn from_count(count: usize) -> Self {
        if count == 0 {
            WakeResult::NoWaiters
        } else {
            WakeResult::Woken(count)
        }
    }

    /// Check if any waiters were woken
    #[inline(always)]
    pub fn is_woken(&self) -> bool {
        matches!(self, WakeResult::Woken(_))
    }

    /// Get number of woken waiters (0 if none)
    #[inline(always)]
    pub fn count(&self) -> usize {
        match self {
            WakeResult::Woken(n) => *n,
            WakeResult::NoWaiters => 0,
        }
    }
}

/// Outcome of a bounded predicate wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// The predicate held (possibly exactly at the deadline)
    Satisfied,
    /// The bound elapsed with the predicate still false
    TimedOut,
}

impl WaitStatus {
    #[inline(always)]
    pub fn is_satisfied(&self) -> bool {
        matches!(self, WaitStatus::Satisfied)
    }

    #[inline(always)]
    pub fn timed_out(&self) -> bool {
        matches!(self, WaitStatus::TimedOut)
    }
}

/// One-shot readiness flag with blocking and bounded waits
///
/// Implementations must be:
/// - **Thread-safe**: `signal` and the waits may race freely
/// - **Sticky**: once signaled, every later wait returns immediately
/// - **Spurious-wakeup tolerant**: waits re-check the flag after every wake
pub trait ReadySignal: Send + Sync {
    /// Set the flag and wake blocked waiters
    fn signal(&self) -> WakeResult;

    /// Non-blocking check
    fn is_signaled(&self) -> bool;

    /// Block until signaled
    fn wait(&self);

    /// Block until signaled or `deadline` passes
    fn wait_until(&self, deadline: Instant) -> WaitStatus;

    /// Block until signaled or `timeout` elapses
    fn wait_for(&self, timeout: Duration) -> WaitStatus {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_until(deadline),
            None => {
                self.wait();
                WaitStatus::Satisfied
            }
        }
    }

    /// Style name for debugging
    fn name(&self) -> &'static str;
}
