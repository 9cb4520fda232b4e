/*!
 * Guarded Wait
 *
 * Predicate-checked condition waiting over parking_lot's Condvar.
 *
 * A wake is a hint, never proof: every wait loop re-evaluates its predicate
 * with the mutex held, which covers spurious wakeups, notifications meant for
 * another predicate, and notifications that raced ahead of the waiter.
 * The condvar releases the mutex and parks in one step, so a notify cannot
 * fall between the predicate check and the block.
 */

use super::traits::{WaitStatus, WakeResult};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Condition variable with predicate loops and waiter accounting
///
/// Use one `GuardedWait` per mutex. parking_lot panics if a condvar is used
/// with two different mutexes at the same time.
pub struct GuardedWait {
    condvar: Condvar,
    waiters: AtomicUsize,
}

impl GuardedWait {
    pub const fn new() -> Self {
        Self {
            condvar: Condvar::new(),
            waiters: AtomicUsize::new(0),
        }
    }

    /// Block while `condition` holds
    ///
    /// `condition` runs with the mutex held, before the first block and after
    /// every wake.
    pub fn wait_while<T, F>(&self, guard: &mut MutexGuard<'_, T>, mut condition: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        while condition(&mut **guard) {
            self.waiters.fetch_add(1, Ordering::Relaxed);
            self.condvar.wait(guard);
            self.waiters.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Block while `condition` holds, at most until `deadline`
    ///
    /// When the deadline passes the predicate is evaluated one final time
    /// under the mutex; a state change that landed exactly at the deadline
    /// reports `Satisfied`.
    pub fn wait_while_until<T, F>(
        &self,
        guard: &mut MutexGuard<'_, T>,
        deadline: Instant,
        mut condition: F,
    ) -> WaitStatus
    where
        F: FnMut(&mut T) -> bool,
    {
        while condition(&mut **guard) {
            if Instant::now() >= deadline {
                return WaitStatus::TimedOut;
            }

            self.waiters.fetch_add(1, Ordering::Relaxed);
            let result = self.condvar.wait_until(guard, deadline);
            self.waiters.fetch_sub(1, Ordering::Relaxed);

            if result.timed_out() {
                return if condition(&mut **guard) {
                    WaitStatus::TimedOut
                } else {
                    WaitStatus::Satisfied
                };
            }
        }
        WaitStatus::Satisfied
    }

    /// Block while `condition` holds, at most for `timeout`
    pub fn wait_while_for<T, F>(
        &self,
        guard: &mut MutexGuard<'_, T>,
        timeout: Duration,
        condition: F,
    ) -> WaitStatus
    where
        F: FnMut(&mut T) -> bool,
    {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_while_until(guard, deadline, condition),
            None => {
                self.wait_while(guard, condition);
                WaitStatus::Satisfied
            }
        }
    }

    /// Wake one waiter to re-check its predicate
    ///
    /// Does not touch guarded state: mutate it under the mutex first.
    #[inline]
    pub fn notify_one(&self) -> WakeResult {
        WakeResult::from_count(self.condvar.notify_one() as usize)
    }

    /// Wake every waiter to re-check its predicate
    #[inline]
    pub fn notify_all(&self) -> WakeResult {
        WakeResult::from_count(self.condvar.notify_all())
    }

    /// Approximate number of blocked waiters (for diagnostics)
    #[inline]
    pub fn waiter_count(&self) -> usize {
        self.waiters.load(Ordering::Relaxed)
    }
}

impl Default for GuardedWait {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GuardedWait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedWait")
            .field("waiters", &self.waiter_count())
            .finish()
    }
}

/// Mutex-protected state bundled with its condition variable (push model)
///
/// # Examples
///
/// ```
/// use sync_toolkit::sync::wait::GuardedState;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(GuardedState::new(Vec::<u32>::new()));
/// let producer = queue.clone();
///
/// let handle = thread::spawn(move || producer.update(|items| items.push(7)));
///
/// let items = queue.wait_ready(|items| !items.is_empty());
/// assert_eq!(*items, vec![7]);
/// # drop(items);
/// # handle.join().unwrap();
/// ```
pub struct GuardedState<T> {
    state: Mutex<T>,
    cond: GuardedWait,
}

impl<T> GuardedState<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: Mutex::new(value),
            cond: GuardedWait::new(),
        }
    }

    /// Lock the state without notifying on release
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock()
    }

    /// Mutate under the lock, then wake all waiters
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut guard = self.state.lock();
            f(&mut *guard)
        };
        self.cond.notify_all();
        result
    }

    /// Mutate under the lock, then wake one waiter
    pub fn update_one<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut guard = self.state.lock();
            f(&mut *guard)
        };
        self.cond.notify_one();
        result
    }

    /// Block until `ready` holds; returns the guard with the lock held
    pub fn wait_ready<F>(&self, mut ready: F) -> MutexGuard<'_, T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut guard = self.state.lock();
        self.cond.wait_while(&mut guard, |state| !ready(&*state));
        guard
    }

    /// Block until `ready` holds or `deadline` passes
    pub fn wait_ready_until<F>(&self, deadline: Instant, mut ready: F) -> (MutexGuard<'_, T>, WaitStatus)
    where
        F: FnMut(&T) -> bool,
    {
        let mut guard = self.state.lock();
        let status = self
            .cond
            .wait_while_until(&mut guard, deadline, |state| !ready(&*state));
        (guard, status)
    }

    /// Block until `ready` holds or `timeout` elapses
    pub fn wait_ready_for<F>(&self, timeout: Duration, mut ready: F) -> (MutexGuard<'_, T>, WaitStatus)
    where
        F: FnMut(&T) -> bool,
    {
        let mut guard = self.state.lock();
        let status = self
            .cond
            .wait_while_for(&mut guard, timeout, |state| !ready(&*state));
        (guard, status)
    }

    #[inline]
    pub fn notify_one(&self) -> WakeResult {
        self.cond.notify_one()
    }

    #[inline]
    pub fn notify_all(&self) -> WakeResult {
        self.cond.notify_all()
    }

    #[inline]
    pub fn waiter_count(&self) -> usize {
        self.cond.waiter_count()
    }

    pub fn into_inner(self) -> T {
        self.state.into_inner()
    }
}

impl<T: Default> Default for GuardedState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for GuardedState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedState")
            .field("state", &self.state)
            .field("waiters", &self.waiter_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_wait_while_wakes_on_notify() {
        let shared = Arc::new((Mutex::new(false), GuardedWait::new()));
        let shared_clone = shared.clone();

        let handle = thread::spawn(move || {
            let (lock, cond) = &*shared_clone;
            let mut guard = lock.lock();
            cond.wait_while(&mut guard, |ready| !*ready);
            *guard
        });

        thread::sleep(Duration::from_millis(50));
        {
            let (lock, _) = &*shared;
            *lock.lock() = true;
        }
        shared.1.notify_one();

        assert!(handle.join().unwrap());
    }

    #[test]
    fn test_notify_without_state_change_is_ignored() {
        let state = Arc::new(GuardedState::new(0u32));
        let state_clone = state.clone();

        let handle = thread::spawn(move || {
            let (guard, status) =
                state_clone.wait_ready_for(Duration::from_millis(300), |n| *n >= 2);
            (*guard, status)
        });

        // Bare notifies and a partial update must not satisfy the waiter
        for _ in 0..3 {
            thread::sleep(Duration::from_millis(20));
            state.notify_all();
        }
        state.update(|n| *n = 1);
        thread::sleep(Duration::from_millis(20));
        state.update(|n| *n = 2);

        let (value, status) = handle.join().unwrap();
        assert_eq!(status, WaitStatus::Satisfied);
        assert_eq!(value, 2);
    }

    #[test]
    fn test_timed_wait_times_out() {
        let state = GuardedState::new(false);
        let start = Instant::now();
        let (guard, status) = state.wait_ready_for(Duration::from_millis(50), |ready| *ready);

        assert_eq!(status, WaitStatus::TimedOut);
        assert!(!*guard);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_satisfied_immediately_does_not_block() {
        let state = GuardedState::new(true);
        let (_, status) = state.wait_ready_for(Duration::ZERO, |ready| *ready);
        assert_eq!(status, WaitStatus::Satisfied);
    }

    #[test]
    fn test_elapsed_deadline_reports_current_state() {
        let state = GuardedState::new(true);
        let past = Instant::now() - Duration::from_millis(10);
        let (_, status) = state.wait_ready_until(past, |ready| *ready);
        assert_eq!(status, WaitStatus::Satisfied);

        let state = GuardedState::new(false);
        let (_, status) = state.wait_ready_until(past, |ready| *ready);
        assert_eq!(status, WaitStatus::TimedOut);
    }

    #[test]
    fn test_waiter_count_and_notify_all() {
        let state = Arc::new(GuardedState::new(false));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let state_clone = state.clone();
                thread::spawn(move || {
                    let guard = state_clone.wait_ready(|ready| *ready);
                    *guard
                })
            })
            .collect();

        // Wait (bounded) for all three to block
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.waiter_count() < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(state.waiter_count(), 3);

        state.update(|ready| *ready = true);

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(state.waiter_count(), 0);
    }

    #[test]
    fn test_notify_with_no_waiters() {
        let cond = GuardedWait::new();
        assert_eq!(cond.notify_one(), WakeResult::NoWaiters);
        assert_eq!(cond.notify_all(), WakeResult::NoWaiters);
    }
}
