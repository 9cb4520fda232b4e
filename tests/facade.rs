/*!
 * Thread-Safe Facade Tests
 *
 * Guarded counter scenario and the public-locks/internal-unlocked discipline
 */

use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use sync_toolkit::guard::{FacadeOp, ThreadSafe};
use sync_toolkit::sync::strategy::{EventLog, ExclusiveLock, Instrumented, SharedLock};

const THREADS: u64 = 10;
const CALLS: u64 = 1_000;
const STEP: u64 = 3;

/// Counter state; every method here is an internal operation
#[derive(Debug, Default)]
struct Tally {
    value: u64,
    calls: u64,
}

impl Tally {
    fn add(&mut self, amount: u64) {
        self.value += amount;
    }

    fn record_call(&mut self) {
        self.calls += 1;
    }
}

/// Shared object: every public method is an external operation
struct Counter<L: sync_toolkit::MutualExclusion = ExclusiveLock> {
    inner: ThreadSafe<Tally, L>,
}

impl Counter {
    fn new() -> Self {
        Self {
            inner: ThreadSafe::new(Tally::default()),
        }
    }
}

impl<L: sync_toolkit::MutualExclusion> Counter<L> {
    fn with_lock(lock: L) -> Self {
        Self {
            inner: ThreadSafe::with_lock(Tally::default(), lock),
        }
    }

    fn increment(&self) {
        self.inner.with(|tally| {
            tally.add(STEP);
            tally.record_call();
        });
    }

    fn snapshot(&self) -> (u64, u64) {
        self.inner.with(|tally| (tally.value, tally.calls))
    }
}

fn hammer<L: sync_toolkit::MutualExclusion + 'static>(counter: Arc<Counter<L>>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let counter = counter.clone();
            thread::spawn(move || {
                for _ in 0..CALLS {
                    counter.increment();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
#[serial]
fn test_guarded_counter_no_lost_updates() {
    let counter = Arc::new(Counter::new());
    hammer(counter.clone());

    assert_eq!(counter.snapshot(), (THREADS * CALLS * STEP, THREADS * CALLS));
}

#[test]
#[serial]
fn test_guarded_counter_locks_once_per_external_call() {
    let lock = Instrumented::new(ExclusiveLock::new());
    let log: EventLog = lock.log();
    let counter = Arc::new(Counter::with_lock(lock));

    hammer(counter.clone());

    // Two internal operations per call, one acquisition per call
    assert_eq!(log.acquisitions() as u64, THREADS * CALLS);
    assert_eq!(log.releases() as u64, THREADS * CALLS);
    assert_eq!(counter.snapshot().1, THREADS * CALLS);
}

#[test]
#[serial]
fn test_guarded_counter_with_writer_lock() {
    static RW: SharedLock = SharedLock::new();

    let counter = Arc::new(Counter::with_lock(RW.write()));
    hammer(counter.clone());

    assert_eq!(counter.snapshot(), (THREADS * CALLS * STEP, THREADS * CALLS));
}

static REGISTRY: ThreadSafe<Vec<&'static str>> = ThreadSafe::new(Vec::new());

#[test]
fn test_static_state_with_static_lock() {
    let handles: Vec<_> = ["alpha", "beta", "gamma"]
        .into_iter()
        .map(|name| thread::spawn(move || REGISTRY.with(|names| names.push(name))))
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut names = REGISTRY.with(|names| names.clone());
    names.sort_unstable();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

/// Customized operation: the facade still decides when the lock is taken
struct Audited<'a> {
    seen: &'a mut Vec<u64>,
}

impl FacadeOp<Tally> for Audited<'_> {
    type Output = u64;

    fn apply(&mut self, state: &mut Tally) -> u64 {
        state.add(1);
        state.record_call();
        self.seen.push(state.value);
        state.value
    }
}

#[test]
fn test_overridden_hook_runs_under_lock() {
    let lock = Instrumented::new(ExclusiveLock::new());
    let log = lock.log();
    let facade = ThreadSafe::with_lock(Tally::default(), lock);

    let mut seen = Vec::new();
    assert_eq!(facade.run(Audited { seen: &mut seen }), 1);
    assert_eq!(facade.run(Audited { seen: &mut seen }), 2);

    assert_eq!(seen, vec![1, 2]);
    assert_eq!(log.acquisitions(), 2);
    assert_eq!(log.releases(), 2);
}

#[test]
fn test_panicking_operation_releases_lock() {
    let facade = Arc::new(ThreadSafe::new(0u32));
    let facade_clone = facade.clone();

    let result = thread::spawn(move || {
        facade_clone.with(|n| {
            *n += 1;
            panic!("internal operation failed");
        })
    })
    .join();
    assert!(result.is_err());

    // Lock was released during unwinding; state keeps the partial update
    assert_eq!(facade.try_with(|n| *n), Some(1));
}

#[test]
#[should_panic(expected = "Reentrant acquisition of non-reentrant exclusive lock")]
fn test_internal_calling_external_is_detected() {
    let counter = Counter::new();
    counter.inner.with(|_| counter.increment());
}
