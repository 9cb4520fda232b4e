/*!
 * Signal State
 * Shared core behind the sender and both receiver kinds
 */

use crate::errors::{SyncError, SyncResult};
use crate::monitoring::WaitSpan;
use crate::sync::wait::GuardedState;
use std::mem;
use std::time::{Duration, Instant};
use tracing::debug;

/// Lifecycle of a one-shot signal
///
/// `Pending` moves to `Ready` (complete) or `Broken` (sender dropped) exactly
/// once. `Ready` moves to `Taken` when the single consumer moves the value out.
pub(crate) enum SignalState<T> {
    Pending,
    Ready(T),
    Taken,
    Broken,
}

impl<T> SignalState<T> {
    #[inline]
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready(_) => "ready",
            Self::Taken => "taken",
            Self::Broken => "broken",
        }
    }

    /// Move the value out, leaving `Taken`
    pub(crate) fn take(&mut self) -> SyncResult<T> {
        match mem::replace(self, Self::Taken) {
            Self::Ready(value) => Ok(value),
            Self::Taken => Err(SyncError::AlreadyConsumed),
            Self::Pending => {
                *self = Self::Pending;
                Err(SyncError::TimedOut)
            }
            Self::Broken => {
                *self = Self::Broken;
                Err(SyncError::Broken)
            }
        }
    }
}

impl<T: Clone> SignalState<T> {
    /// Clone the value out, leaving it in place for other observers
    pub(crate) fn observe(&self) -> SyncResult<T> {
        match self {
            Self::Ready(value) => Ok(value.clone()),
            Self::Pending => Err(SyncError::TimedOut),
            Self::Taken => Err(SyncError::AlreadyConsumed),
            Self::Broken => Err(SyncError::Broken),
        }
    }
}

fn outcome<T>(result: &SyncResult<T>) -> &'static str {
    match result {
        Ok(_) => "ready",
        Err(SyncError::TimedOut) => "timed_out",
        Err(SyncError::Broken) => "broken",
        Err(_) => "rejected",
    }
}

pub(crate) struct Inner<T> {
    state: GuardedState<SignalState<T>>,
    slow_wait: Duration,
}

impl<T> Inner<T> {
    pub(crate) fn new(slow_wait: Duration) -> Self {
        Self {
            state: GuardedState::new(SignalState::Pending),
            slow_wait,
        }
    }

    /// Pending to Ready, then wake every waiter
    pub(crate) fn complete(&self, value: T) -> SyncResult<()> {
        {
            let mut state = self.state.lock();
            if !state.is_pending() {
                debug!(state = state.name(), "signal completed twice");
                return Err(SyncError::AlreadyCompleted);
            }
            *state = SignalState::Ready(value);
        }
        let woken = self.state.notify_all();
        debug!(waiters = woken.count(), "signal completed");
        Ok(())
    }

    /// Pending to Broken; no-op once resolved
    pub(crate) fn abandon(&self) {
        {
            let mut state = self.state.lock();
            if !state.is_pending() {
                return;
            }
            *state = SignalState::Broken;
        }
        let woken = self.state.notify_all();
        debug!(waiters = woken.count(), "signal broken: sender dropped");
    }

    pub(crate) fn is_resolved(&self) -> bool {
        !self.state.lock().is_pending()
    }

    pub(crate) fn is_ready(&self) -> bool {
        matches!(*self.state.lock(), SignalState::Ready(_))
    }

    pub(crate) fn state_name(&self) -> &'static str {
        self.state.lock().name()
    }

    /// Inspect the state without blocking
    pub(crate) fn poll<R>(&self, extract: impl FnOnce(&mut SignalState<T>) -> SyncResult<R>) -> SyncResult<R> {
        extract(&mut *self.state.lock())
    }

    /// Block until resolved (or `deadline`), then hand the state to `extract`
    ///
    /// A state still `Pending` after the bound maps to `TimedOut` inside
    /// `extract`; the resolution check under the lock at the deadline decides.
    pub(crate) fn wait_with<R>(
        &self,
        operation: &'static str,
        deadline: Option<Instant>,
        extract: impl FnOnce(&mut SignalState<T>) -> SyncResult<R>,
    ) -> SyncResult<R> {
        let mut span = WaitSpan::new(operation, self.slow_wait);
        let timeout_ms = deadline.map(|deadline| {
            let timeout = deadline.saturating_duration_since(Instant::now());
            span.record_timeout(timeout);
            timeout.as_millis() as u64
        });

        let result = match deadline {
            None => {
                let mut state = self.state.wait_ready(|state| !state.is_pending());
                extract(&mut *state)
            }
            Some(deadline) => {
                let (mut state, _status) = self
                    .state
                    .wait_ready_until(deadline, |state| !state.is_pending());
                extract(&mut *state)
            }
        };

        if matches!(result, Err(SyncError::TimedOut)) {
            debug!(operation, timeout_ms = timeout_ms.unwrap_or_default(), "signal wait timed out");
        }
        span.record_outcome(outcome(&result));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_transitions() {
        let mut state = SignalState::Ready(5);
        assert_eq!(state.take(), Ok(5));
        assert_eq!(state.name(), "taken");
        assert_eq!(state.take(), Err(SyncError::AlreadyConsumed));

        let mut state = SignalState::<u8>::Pending;
        assert_eq!(state.take(), Err(SyncError::TimedOut));
        assert!(state.is_pending());

        let mut state = SignalState::<u8>::Broken;
        assert_eq!(state.take(), Err(SyncError::Broken));
        assert_eq!(state.name(), "broken");
    }

    #[test]
    fn test_observe_leaves_value() {
        let state = SignalState::Ready(String::from("go"));
        assert_eq!(state.observe(), Ok("go".to_string()));
        assert_eq!(state.observe(), Ok("go".to_string()));
    }

    #[test]
    fn test_timed_out_wait_logs_bound() {
        use parking_lot::Mutex;
        use std::sync::Arc;
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Clone, Default)]
        struct TimeoutFields(Arc<Mutex<Vec<bool>>>);

        impl<S: tracing::Subscriber> Layer<S> for TimeoutFields {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                let fields = event.metadata().fields();
                if fields.field("message").is_some() && event.metadata().level() == &tracing::Level::DEBUG {
                    self.0.lock().push(fields.field("timeout_ms").is_some());
                }
            }
        }

        let layer = TimeoutFields::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let inner = Inner::<u8>::new(Duration::from_secs(10));

        let result = tracing::subscriber::with_default(subscriber, || {
            inner.wait_with("bounded", Some(Instant::now() + Duration::from_millis(5)), SignalState::take)
        });

        assert_eq!(result, Err(SyncError::TimedOut));
        // Timeout event first, then the span's completion event
        assert_eq!(layer.0.lock().first(), Some(&true));
    }

    #[test]
    fn test_abandon_after_complete_keeps_value() {
        let inner = Inner::new(Duration::from_secs(1));
        inner.complete(1).unwrap();
        inner.abandon();
        assert!(inner.is_ready());
        assert_eq!(inner.complete(2), Err(SyncError::AlreadyCompleted));
        assert_eq!(inner.poll(SignalState::take), Ok(1));
    }
}
