/*!
 * Push-Model Ready Signal
 *
 * The signaler sets a flag under the mutex and notifies the condvar; waiters
 * block on the condvar and never poll.
 */

use super::guarded::GuardedState;
use super::traits::{ReadySignal, WaitStatus, WakeResult};
use std::time::Instant;

/// Condvar-backed readiness flag
#[derive(Debug, Default)]
pub struct PushSignal {
    ready: GuardedState<bool>,
}

impl PushSignal {
    pub fn new() -> Self {
        Self {
            ready: GuardedState::new(false),
        }
    }

    /// Approximate number of blocked waiters
    pub fn waiter_count(&self) -> usize {
        self.ready.waiter_count()
    }
}

impl ReadySignal for PushSignal {
    fn signal(&self) -> WakeResult {
        *self.ready.lock() = true;
        self.ready.notify_all()
    }

    fn is_signaled(&self) -> bool {
        *self.ready.lock()
    }

    fn wait(&self) {
        let _ready = self.ready.wait_ready(|ready| *ready);
    }

    fn wait_until(&self, deadline: Instant) -> WaitStatus {
        let (_ready, status) = self.ready.wait_ready_until(deadline, |ready| *ready);
        status
    }

    fn name(&self) -> &'static str {
        "push"
    }
}
