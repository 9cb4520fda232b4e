/*!
 * Pull-Model Ready Signal
 *
 * The signaler stores to an atomic flag; waiters poll it with an adaptive
 * backoff (spin, then yield, then sleep). Nothing ever blocks on a
 * notification, so `signal` wakes no one and reports `NoWaiters`.
 *
 * Best for scenarios where:
 * - The wait is typically very short (the spin phase catches it)
 * - The signaler must not touch a mutex (e.g. it runs in a tight loop)
 */

use super::traits::{ReadySignal, WaitStatus, WakeResult};
use crate::sync::config::SyncConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Spin-then-sleep polling schedule
#[derive(Debug, Clone, Copy)]
struct Backoff {
    spins: u32,
    max_spins: u32,
    poll_interval: Duration,
}

impl Backoff {
    fn new(max_spins: u32, poll_interval: Duration) -> Self {
        Self {
            spins: 0,
            max_spins,
            poll_interval,
        }
    }

    /// Pause before the next poll, never sleeping past `deadline`
    fn snooze(&mut self, deadline: Option<Instant>) {
        if self.spins < self.max_spins {
            // Yield to scheduler occasionally
            if self.spins % 10 == 9 {
                thread::yield_now();
            } else {
                std::hint::spin_loop();
            }
            self.spins += 1;
            return;
        }

        let nap = match deadline {
            Some(deadline) => self
                .poll_interval
                .min(deadline.saturating_duration_since(Instant::now())),
            None => self.poll_interval,
        };
        if nap.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(nap);
        }
    }
}

/// Atomic readiness flag polled by waiters
#[derive(Debug)]
pub struct PullSignal {
    ready: AtomicBool,
    max_spins: u32,
    poll_interval: Duration,
}

impl PullSignal {
    pub fn new(max_spins: u32, poll_interval: Duration) -> Self {
        Self {
            ready: AtomicBool::new(false),
            max_spins,
            poll_interval,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.max_spins, config.poll_interval)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Default for PullSignal {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}

impl ReadySignal for PullSignal {
    fn signal(&self) -> WakeResult {
        // Release pairs with the Acquire load in waiters: writes made before
        // signaling are visible once the flag is observed.
        self.ready.store(true, Ordering::Release);
        WakeResult::NoWaiters
    }

    #[inline]
    fn is_signaled(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn wait(&self) {
        let mut backoff = Backoff::new(self.max_spins, self.poll_interval);
        while !self.is_signaled() {
            backoff.snooze(None);
        }
    }

    fn wait_until(&self, deadline: Instant) -> WaitStatus {
        let mut backoff = Backoff::new(self.max_spins, self.poll_interval);
        loop {
            if self.is_signaled() {
                return WaitStatus::Satisfied;
            }
            if Instant::now() >= deadline {
                // One last look: a store that landed at the deadline wins
                return if self.is_signaled() {
                    WaitStatus::Satisfied
                } else {
                    WaitStatus::TimedOut
                };
            }
            backoff.snooze(Some(deadline));
        }
    }

    fn name(&self) -> &'static str {
        "pull"
    }
}
