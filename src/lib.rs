/*!
 * Sync Toolkit Library
 * Lock strategies, scoped guards, thread-safe facades and completion signals
 */

pub mod errors;
pub mod guard;
pub mod monitoring;
pub mod sync;

// Re-exports
pub use errors::*;
pub use guard::{FacadeOp, ScopeGuard, ThreadSafe};
pub use monitoring::init_tracing;
pub use sync::signal::{broadcast, channel, channel_with};
pub use sync::strategy::{ExclusiveLock, NoOpLock, SharedLock};
pub use sync::{
    BroadcastReceiver, LockStrategy, Lockable, MutualExclusion, NotifyStyle, SignalReceiver,
    SignalSender, StrategizedLocking, StrategyType, SyncConfig,
};
