/*!
 * Wait/Notify Primitives
 *
 * Predicate-guarded waiting with two notification styles:
 * - Push: state mutated under a mutex, then condvar notify (`GuardedWait`,
 *   `GuardedState`, `PushSignal`)
 * - Pull: atomic flag polled with backoff (`PullSignal`)
 *
 * # Architecture
 *
 * `GuardedWait` is the primitive both signal channel types block on.
 * `ReadySignal` abstracts a one-shot readiness flag so push and pull can be
 * swapped through `ReadyFlag` and `SyncConfig::notify_style`.
 */

mod flag;
mod guarded;
mod pull;
mod push;
mod traits;

// Re-export public API
pub use flag::ReadyFlag;
pub use guarded::{GuardedState, GuardedWait};
pub use pull::PullSignal;
pub use push::PushSignal;
pub use traits::{ReadySignal, WaitStatus, WakeResult};
