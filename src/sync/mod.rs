/*!
 * Synchronization Primitives
 *
 * Building blocks for sharing state between OS threads:
 * - Lock strategies selectable at compile time or at runtime
 * - Predicate-guarded wait/notify with push and pull notification
 * - One-shot and broadcast completion signals
 *
 * # Architecture
 *
 * `strategy` supplies the `Lockable` capability that `guard::ScopeGuard` and
 * `guard::ThreadSafe` build on. `wait::GuardedWait` is the blocking primitive
 * the `signal` channels wait through. `SyncConfig` selects strategies and
 * notification styles from code or the environment.
 *
 * # Use Cases
 *
 * - **Worker handoff**: a worker completes a signal, the boss blocks on it
 * - **Start barriers**: one broadcast releases many waiting workers
 * - **Shared counters**: a facade serializes every operation on its state
 */

mod config;
pub mod signal;
pub mod strategy;
pub mod wait;

pub use config::{NotifyStyle, StrategyType, SyncConfig};
pub use signal::{BroadcastReceiver, SignalReceiver, SignalSender};
pub use strategy::{LockStrategy, Lockable, MutualExclusion, StrategizedLocking};
pub use wait::{GuardedState, GuardedWait, ReadyFlag, ReadySignal, WaitStatus, WakeResult};
