/*!
 * One-Shot Signal Channel
 * Single producer, single consumer handoff of one completion value
 */

use super::broadcast::BroadcastReceiver;
use super::state::{Inner, SignalState};
use crate::errors::SyncResult;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Producing half of a signal channel
///
/// Dropping the sender before completing breaks the channel: blocked and
/// future waits return `SyncError::Broken`.
pub struct SignalSender<T> {
    inner: Arc<Inner<T>>,
}

/// Consuming half of a one-shot signal channel
pub struct SignalReceiver<T> {
    inner: Arc<Inner<T>>,
}

impl<T> SignalSender<T> {
    pub(crate) fn new(inner: Arc<Inner<T>>) -> Self {
        Self { inner }
    }

    /// Publish the value and wake every waiter
    ///
    /// Succeeds once. Later calls return `AlreadyCompleted` and leave the
    /// first value in place.
    pub fn complete(&self, value: T) -> SyncResult<()> {
        self.inner.complete(value)
    }

    /// True once the channel has a value (taken or not)
    pub fn is_completed(&self) -> bool {
        self.inner.is_resolved()
    }
}

impl SignalSender<()> {
    /// Complete a pure notification channel
    pub fn notify(&self) -> SyncResult<()> {
        self.complete(())
    }
}

impl<T> Drop for SignalSender<T> {
    fn drop(&mut self) {
        self.inner.abandon();
    }
}

impl<T> fmt::Debug for SignalSender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSender")
            .field("state", &self.inner.state_name())
            .finish()
    }
}

impl<T> SignalReceiver<T> {
    pub(crate) fn new(inner: Arc<Inner<T>>) -> Self {
        Self { inner }
    }

    /// Block until the value arrives or the sender is dropped
    pub fn wait(self) -> SyncResult<T> {
        self.inner.wait_with("signal_wait", None, SignalState::take)
    }

    /// Block for at most `timeout`
    ///
    /// Returns `Err(TimedOut)` with the receiver still usable when nothing
    /// arrived in time.
    pub fn wait_for(&mut self, timeout: Duration) -> SyncResult<T> {
        let deadline = Instant::now().checked_add(timeout);
        self.inner.wait_with("signal_wait_for", deadline, SignalState::take)
    }

    /// Block until `deadline` at the latest
    pub fn wait_until(&mut self, deadline: Instant) -> SyncResult<T> {
        self.inner
            .wait_with("signal_wait_until", Some(deadline), SignalState::take)
    }

    /// Take the value if it is already there
    pub fn try_wait(&mut self) -> SyncResult<T> {
        self.inner.poll(SignalState::take)
    }

    /// True when a value is waiting to be taken
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Convert into a cloneable observer of the same signal
    pub fn share(self) -> BroadcastReceiver<T> {
        BroadcastReceiver::new(self.inner)
    }
}

impl<T> fmt::Debug for SignalReceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalReceiver")
            .field("state", &self.inner.state_name())
            .finish()
    }
}
