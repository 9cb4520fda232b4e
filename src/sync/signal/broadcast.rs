/*!
 * Broadcast Signal
 * Read-only, cloneable view of a signal's result
 */

use super::state::{Inner, SignalState};
use crate::errors::SyncResult;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Observer handle shared by any number of waiters
///
/// Every clone observes the same completion. The value is cloned out and
/// never moved, so no observer can starve another.
///
/// # Examples
///
/// ```
/// use sync_toolkit::sync::signal;
/// use std::thread;
///
/// let (tx, rx) = signal::broadcast::<&str>();
///
/// let handles: Vec<_> = (0..3)
///     .map(|_| {
///         let rx = rx.clone();
///         thread::spawn(move || rx.wait())
///     })
///     .collect();
///
/// tx.complete("go").unwrap();
/// for handle in handles {
///     assert_eq!(handle.join().unwrap(), Ok("go"));
/// }
/// ```
pub struct BroadcastReceiver<T> {
    inner: Arc<Inner<T>>,
}

impl<T> BroadcastReceiver<T> {
    pub(crate) fn new(inner: Arc<Inner<T>>) -> Self {
        Self { inner }
    }

    /// True once the value is available
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }
}

impl<T: Clone> BroadcastReceiver<T> {
    /// Block until the value arrives or the sender is dropped
    pub fn wait(&self) -> SyncResult<T> {
        self.inner.wait_with("broadcast_wait", None, |state| state.observe())
    }

    pub fn wait_for(&self, timeout: Duration) -> SyncResult<T> {
        let deadline = Instant::now().checked_add(timeout);
        self.inner
            .wait_with("broadcast_wait_for", deadline, |state| state.observe())
    }

    pub fn wait_until(&self, deadline: Instant) -> SyncResult<T> {
        self.inner
            .wait_with("broadcast_wait_until", Some(deadline), |state| state.observe())
    }

    /// Clone the value if it is already there
    pub fn try_wait(&self) -> SyncResult<T> {
        self.inner.poll(|state: &mut SignalState<T>| state.observe())
    }
}

impl<T> Clone for BroadcastReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for BroadcastReceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastReceiver")
            .field("state", &self.inner.state_name())
            .field("observers", &Arc::strong_count(&self.inner).saturating_sub(1))
            .finish()
    }
}
