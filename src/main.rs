/*!
 * Sync Toolkit - Demo Entry Point
 *
 * Runs the two reference scenarios:
 * - Boss/worker: three one-shot signals worker to boss, one broadcast back
 * - Guarded counter: ten threads through a thread-safe facade
 *
 * Environment variables:
 * - SYNC_LOCK_STRATEGY, SYNC_NOTIFY_STYLE, SYNC_POLL_INTERVAL_US: see `SyncConfig::from_env`
 * - RUST_LOG, SYNC_TRACE_JSON: see `init_tracing`
 */

use miette::{miette, Result};
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use sync_toolkit::sync::{ReadyFlag, ReadySignal};
use sync_toolkit::{
    broadcast, channel_with, init_tracing, StrategizedLocking, SyncConfig, SyncResult, ThreadSafe,
};

const WORKERS: usize = 3;
const COUNTER_THREADS: u64 = 10;
const CALLS_PER_THREAD: u64 = 1_000;

fn main() -> Result<()> {
    init_tracing();

    let config = SyncConfig::from_env()?;
    info!(
        strategy = %config.lock_strategy,
        notify_style = %config.notify_style,
        poll_interval_us = config.poll_interval.as_micros() as u64,
        "configuration loaded"
    );

    boss_worker(&config)?;
    guarded_counter()?;
    configured_strategy(&config);
    ready_flag(&config)?;

    info!("all scenarios completed");
    Ok(())
}

/// Workers report ready, then all start on one broadcast
fn boss_worker(config: &SyncConfig) -> Result<()> {
    let (start_tx, start_rx) = broadcast::<Instant>();

    let mut ready = Vec::with_capacity(WORKERS);
    let mut handles = Vec::with_capacity(WORKERS);

    for id in 0..WORKERS {
        let (ready_tx, ready_rx) = channel_with::<usize>(config);
        let start = start_rx.clone();
        ready.push(ready_rx);

        handles.push(thread::spawn(move || -> SyncResult<Instant> {
            let prep = Duration::from_millis(rand::thread_rng().gen_range(10..100));
            thread::sleep(prep);
            info!(worker = id, prep_ms = prep.as_millis() as u64, "worker prepared");

            ready_tx.complete(id)?;
            start.wait()?;
            Ok(Instant::now())
        }));
    }

    for rx in ready {
        let id = rx.wait()?;
        info!(worker = id, "boss received ready");
    }

    let released_at = Instant::now();
    start_tx.complete(released_at)?;
    info!("boss broadcast start");

    for (id, handle) in handles.into_iter().enumerate() {
        let started = handle
            .join()
            .map_err(|_| miette!("worker {id} panicked"))??;
        if started < released_at {
            return Err(miette!("worker {id} started before the broadcast"));
        }
    }

    info!(workers = WORKERS, "boss/worker scenario passed");
    Ok(())
}

struct Tally {
    value: u64,
    calls: u64,
}

impl Tally {
    // Internal operations: the facade lock is already held
    fn add(&mut self, amount: u64) {
        self.value += amount;
    }

    fn record_call(&mut self) {
        self.calls += 1;
    }
}

static COUNTER: ThreadSafe<Tally> = ThreadSafe::new(Tally { value: 0, calls: 0 });

/// External operation: one lock, two internal operations
fn increment() {
    COUNTER.with(|tally| {
        tally.add(2);
        tally.record_call();
    });
}

fn guarded_counter() -> Result<()> {
    let handles: Vec<_> = (0..COUNTER_THREADS)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..CALLS_PER_THREAD {
                    increment();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().map_err(|_| miette!("counter thread panicked"))?;
    }

    let (value, calls) = COUNTER.with(|tally| (tally.value, tally.calls));
    let expected = COUNTER_THREADS * CALLS_PER_THREAD;
    if calls != expected || value != 2 * expected {
        return Err(miette!("lost updates: value={value} calls={calls} expected_calls={expected}"));
    }

    info!(value, calls, strategy = COUNTER.strategy_name(), "guarded counter scenario passed");
    Ok(())
}

/// Strategy chosen at runtime guards single-threaded bookkeeping
fn configured_strategy(config: &SyncConfig) {
    let locking = StrategizedLocking::from_config(config);
    let sections: u32 = (0..3).map(|_| locking.with(|| 1)).sum();
    info!(strategy = locking.strategy_name(), sections, "configured strategy exercised");
}

fn ready_flag(config: &SyncConfig) -> Result<()> {
    let flag = ReadyFlag::from_config(config);

    let status = thread::scope(|s| {
        s.spawn(|| {
            thread::sleep(Duration::from_millis(5));
            flag.signal();
        });
        flag.wait_for(Duration::from_secs(5))
    });

    if status.timed_out() {
        return Err(miette!("{} ready flag never fired", flag.name()));
    }

    info!(style = flag.name(), "ready flag exercised");
    Ok(())
}
