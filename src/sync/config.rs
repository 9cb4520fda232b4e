/*!
 * Synchronization Configuration
 *
 * Runtime configuration for lock strategy and notification style selection
 */

use crate::errors::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Lock strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// No synchronization (provably single-threaded context)
    NoOp,
    /// One holder at a time
    Exclusive,
    /// Many readers (writers go through `SharedLock::write`)
    Shared,
}

impl StrategyType {
    pub const ALL: [StrategyType; 3] = [Self::NoOp, Self::Exclusive, Self::Shared];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoOp => "noop",
            Self::Exclusive => "exclusive",
            Self::Shared => "shared",
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyType {
    type Err = SyncError;

    fn from_str(s: &str) -> SyncResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noop" | "no_op" | "none" => Ok(Self::NoOp),
            "exclusive" | "mutex" => Ok(Self::Exclusive),
            "shared" | "rwlock" => Ok(Self::Shared),
            other => Err(SyncError::CapabilityMismatch {
                strategy: other.to_string(),
                required: "lock/unlock".to_string(),
            }),
        }
    }
}

/// How a waiter learns that its predicate may have changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyStyle {
    /// Condvar notification after mutating state under the lock
    Push,
    /// Waiter polls an atomic flag with backoff
    Pull,
}

impl NotifyStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
        }
    }
}

impl fmt::Display for NotifyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotifyStyle {
    type Err = SyncError;

    fn from_str(s: &str) -> SyncResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "push" | "condvar" => Ok(Self::Push),
            "pull" | "poll" => Ok(Self::Pull),
            other => Err(SyncError::CapabilityMismatch {
                strategy: other.to_string(),
                required: "signal/wait".to_string(),
            }),
        }
    }
}

/// Synchronization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Lock strategy for `LockStrategy::from_config`
    pub lock_strategy: StrategyType,
    /// Notification style for `ReadyFlag::from_config`
    pub notify_style: NotifyStyle,
    /// Sleep between polls once the pull model stops spinning
    pub poll_interval: Duration,
    /// Spin iterations before the pull model starts sleeping
    pub max_spins: u32,
    /// Waits longer than this are logged at warn level
    pub slow_wait_threshold: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lock_strategy: StrategyType::Exclusive,
            notify_style: NotifyStyle::Push,
            poll_interval: Duration::from_micros(100),
            max_spins: 100,
            slow_wait_threshold: Duration::from_secs(1),
        }
    }
}

impl SyncConfig {
    /// Configuration optimized for low-latency (< 1ms wait expected)
    pub const fn low_latency() -> Self {
        Self {
            lock_strategy: StrategyType::Exclusive,
            notify_style: NotifyStyle::Pull,
            poll_interval: Duration::from_micros(10),
            max_spins: 500,
            slow_wait_threshold: Duration::from_millis(10),
        }
    }

    /// Configuration optimized for long waits (> 1ms expected)
    pub const fn long_wait() -> Self {
        Self {
            lock_strategy: StrategyType::Exclusive,
            notify_style: NotifyStyle::Push,
            poll_interval: Duration::from_millis(1),
            max_spins: 10,
            slow_wait_threshold: Duration::from_secs(10),
        }
    }

    /// Build from environment variables, falling back to defaults
    ///
    /// Environment variables:
    /// - SYNC_LOCK_STRATEGY: noop | exclusive | shared
    /// - SYNC_NOTIFY_STYLE: push | pull
    /// - SYNC_POLL_INTERVAL_US: poll interval in microseconds
    ///
    /// An unknown strategy or style name is rejected here, before any lock
    /// is built. A poll interval that is not a whole number of microseconds
    /// is rejected with `InvalidConfig`.
    pub fn from_env() -> SyncResult<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("SYNC_LOCK_STRATEGY") {
            config.lock_strategy = value.parse()?;
        }
        if let Ok(value) = std::env::var("SYNC_NOTIFY_STYLE") {
            config.notify_style = value.parse()?;
        }
        if let Ok(value) = std::env::var("SYNC_POLL_INTERVAL_US") {
            let us = value.trim().parse::<u64>().map_err(|_| SyncError::InvalidConfig {
                key: "SYNC_POLL_INTERVAL_US".to_string(),
                value: value.clone(),
            })?;
            config.poll_interval = Duration::from_micros(us);
        }

        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: StrategyType) -> Self {
        self.lock_strategy = strategy;
        self
    }

    pub fn with_notify_style(mut self, style: NotifyStyle) -> Self {
        self.notify_style = style;
        self
    }
}
