/*!
 * Strategy Dispatch Equivalence Tests
 *
 * The same locking program must produce the same acquire/release sequence
 * whether the strategy is a generic parameter, a `LockStrategy` enum, or a
 * `Box<dyn Lockable>`.
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use sync_toolkit::sync::strategy::{
    EventLog, ExclusiveLock, Instrumented, LockEvent, LockStrategy, Lockable, NoOpLock, SharedLock,
    StrategizedLocking,
};
use sync_toolkit::{ScopeGuard, StrategyType};

#[derive(Debug, Clone, Copy)]
enum Op {
    /// Acquire `n` distinct locks nested, release innermost first
    Nested(usize),
    /// Non-blocking attempt on a free lock
    Try,
    /// Non-blocking attempt on a lock this thread already holds
    TryWhileHeld,
}

fn run_program<L: Lockable>(make: impl Fn() -> L, program: &[Op]) -> Vec<LockEvent> {
    let log = EventLog::new();
    let instrument = || Instrumented::with_log(make(), log.clone());

    for op in program {
        match *op {
            Op::Nested(depth) => {
                let locks: Vec<_> = (0..depth).map(|_| instrument()).collect();
                let mut guards: Vec<_> = locks.iter().map(|lock| ScopeGuard::acquire(lock)).collect();
                while let Some(guard) = guards.pop() {
                    drop(guard);
                }
            }
            Op::Try => {
                let lock = instrument();
                let guard = ScopeGuard::try_acquire(&lock);
                assert!(guard.is_some());
            }
            Op::TryWhileHeld => {
                let lock = instrument();
                let _held = ScopeGuard::acquire(&lock);
                let _second = ScopeGuard::try_acquire(&lock);
            }
        }
    }

    log.snapshot()
}

fn static_form(strategy: StrategyType, program: &[Op]) -> Vec<LockEvent> {
    match strategy {
        StrategyType::NoOp => run_program(NoOpLock::new, program),
        StrategyType::Exclusive => run_program(ExclusiveLock::new, program),
        StrategyType::Shared => run_program(SharedLock::new, program),
    }
}

fn enum_form(strategy: StrategyType, program: &[Op]) -> Vec<LockEvent> {
    run_program(move || LockStrategy::new(strategy), program)
}

fn dyn_form(strategy: StrategyType, program: &[Op]) -> Vec<LockEvent> {
    run_program(move || LockStrategy::new(strategy).into_dyn(), program)
}

#[test]
fn test_forms_agree_on_fixed_program() {
    let program = [Op::Nested(1), Op::Nested(3), Op::Try, Op::TryWhileHeld];

    for strategy in StrategyType::ALL {
        let expected = static_form(strategy, &program);
        assert_eq!(enum_form(strategy, &program), expected, "{strategy} enum");
        assert_eq!(dyn_form(strategy, &program), expected, "{strategy} dyn");
    }
}

#[test]
fn test_exclusive_sequence_shape() {
    let events = static_form(StrategyType::Exclusive, &[Op::Nested(2), Op::TryWhileHeld]);
    let name = "exclusive";
    assert_eq!(
        events,
        vec![
            LockEvent::Acquire(name),
            LockEvent::Acquire(name),
            LockEvent::Release(name),
            LockEvent::Release(name),
            LockEvent::Acquire(name),
            LockEvent::TryAcquire { strategy: name, acquired: false },
            LockEvent::Release(name),
        ]
    );
}

#[test]
fn test_try_while_held_differs_by_strategy() {
    let acquired = |strategy| {
        static_form(strategy, &[Op::TryWhileHeld])
            .into_iter()
            .any(|e| matches!(e, LockEvent::TryAcquire { acquired: true, .. }))
    };
    // Readers and the no-op lock admit a second holder; the exclusive lock does not
    assert!(acquired(StrategyType::NoOp));
    assert!(acquired(StrategyType::Shared));
    assert!(!acquired(StrategyType::Exclusive));
}

#[test]
fn test_heterogeneous_runtime_strategies_serialize_writers() {
    // Only strategies with real exclusion may guard shared writes
    let contexts: Vec<Arc<StrategizedLocking<Box<dyn Lockable>>>> = vec![
        Arc::new(StrategizedLocking::dynamic(ExclusiveLock::new())),
        Arc::new(StrategizedLocking::new(LockStrategy::new(StrategyType::Exclusive).into_dyn())),
    ];

    for ctx in contexts {
        let hits = Arc::new(AtomicU64::new(0));
        let in_section = Arc::new(AtomicU64::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ctx = ctx.clone();
                let hits = hits.clone();
                let in_section = in_section.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        ctx.with(|| {
                            assert_eq!(in_section.fetch_add(1, Ordering::SeqCst), 0);
                            hits.fetch_add(1, Ordering::Relaxed);
                            in_section.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(hits.load(Ordering::Relaxed), 2000);
    }
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1usize..4).prop_map(Op::Nested),
        Just(Op::Try),
        Just(Op::TryWhileHeld),
    ]
}

fn arb_strategy() -> impl Strategy<Value = StrategyType> {
    prop_oneof![
        Just(StrategyType::NoOp),
        Just(StrategyType::Exclusive),
        Just(StrategyType::Shared),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_dispatch_forms_are_indistinguishable(
        strategy in arb_strategy(),
        program in proptest::collection::vec(arb_op(), 0..12),
    ) {
        let expected = static_form(strategy, &program);
        prop_assert_eq!(enum_form(strategy, &program), expected.clone());
        prop_assert_eq!(dyn_form(strategy, &program), expected.clone());

        let acquires = expected.iter().filter(|e| matches!(e, LockEvent::Acquire(_))).count();
        let taken = expected
            .iter()
            .filter(|e| matches!(e, LockEvent::TryAcquire { acquired: true, .. }))
            .count();
        let releases = expected.iter().filter(|e| matches!(e, LockEvent::Release(_))).count();
        prop_assert_eq!(acquires + taken, releases);
    }
}
