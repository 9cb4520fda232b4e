/*!
 * Signal Channels
 *
 * One-shot completion signals between threads.
 *
 * - `channel()`: one producer hands exactly one value to one consumer
 * - `broadcast()`: one producer, any number of observers that each get a clone
 *
 * # Lifecycle
 *
 * ```text
 * Pending --complete--> Ready --take--> Taken
 *    |
 *    +--sender dropped--> Broken
 * ```
 *
 * Every transition happens under the channel mutex and is followed by a
 * notify-all, so a waiter that re-acquires the lock observes the value written
 * before the notification. Waits block on the condvar and never spin.
 */

mod broadcast;
mod oneshot;
mod state;

pub use broadcast::BroadcastReceiver;
pub use oneshot::{SignalReceiver, SignalSender};

use crate::sync::config::SyncConfig;
use state::Inner;
use std::sync::Arc;

/// Create a one-shot channel with default configuration
pub fn channel<T>() -> (SignalSender<T>, SignalReceiver<T>) {
    channel_with(&SyncConfig::default())
}

/// Create a one-shot channel; waits longer than the configured slow-wait
/// threshold are logged at `warn`
pub fn channel_with<T>(config: &SyncConfig) -> (SignalSender<T>, SignalReceiver<T>) {
    let inner = Arc::new(Inner::new(config.slow_wait_threshold));
    (SignalSender::new(Arc::clone(&inner)), SignalReceiver::new(inner))
}

/// Create a channel whose receiving side is already shared
pub fn broadcast<T: Clone>() -> (SignalSender<T>, BroadcastReceiver<T>) {
    let (tx, rx) = channel();
    (tx, rx.share())
}
