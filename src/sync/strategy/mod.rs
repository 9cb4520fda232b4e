/*!
 * Lock Strategies
 *
 * Interchangeable locking behaviors behind the `Lockable` capability:
 * - `NoOpLock` for provably single-threaded contexts
 * - `ExclusiveLock` for one holder at a time
 * - `SharedLock` for many readers (writers via `SharedLock::write`)
 *
 * Select at compile time with a generic parameter, or at runtime through
 * `LockStrategy` / `Box<dyn Lockable>`.
 */

mod dispatch;
mod exclusive;
mod instrumented;
mod noop;
mod shared;
mod strategized;
mod traits;

pub use dispatch::LockStrategy;
pub use exclusive::ExclusiveLock;
pub use instrumented::{EventLog, Instrumented, LockEvent};
pub use noop::NoOpLock;
pub use shared::{SharedLock, WriteLock};
pub use strategized::StrategizedLocking;
pub use traits::{Lockable, MutualExclusion};
