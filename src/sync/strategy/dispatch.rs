/*!
 * Runtime Strategy Selection
 *
 * # Design: Enum Dispatch for the Closed Set
 *
 * The strategy set is closed ({NoOp, Exclusive, Shared}), so runtime selection
 * uses an enum rather than `Box<dyn Lockable>`: one match per call, no vtable,
 * no allocation. `into_dyn` is still there for callers that want to mix in
 * their own strategies through trait objects.
 */

use super::exclusive::ExclusiveLock;
use super::noop::NoOpLock;
use super::shared::SharedLock;
use super::traits::Lockable;
use crate::sync::config::{StrategyType, SyncConfig};
use tracing::debug;

/// Strategy chosen at construction time
#[derive(Debug)]
pub enum LockStrategy {
    NoOp(NoOpLock),
    Exclusive(ExclusiveLock),
    Shared(SharedLock),
}

impl LockStrategy {
    /// Build the strategy named by `strategy`
    pub fn new(strategy: StrategyType) -> Self {
        debug!(strategy = %strategy, "lock strategy selected");
        match strategy {
            StrategyType::NoOp => Self::NoOp(NoOpLock::new()),
            StrategyType::Exclusive => Self::Exclusive(ExclusiveLock::new()),
            StrategyType::Shared => Self::Shared(SharedLock::new()),
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.lock_strategy)
    }

    pub fn strategy_type(&self) -> StrategyType {
        match self {
            Self::NoOp(_) => StrategyType::NoOp,
            Self::Exclusive(_) => StrategyType::Exclusive,
            Self::Shared(_) => StrategyType::Shared,
        }
    }

    /// Trait-object form, for heterogeneous collections
    pub fn into_dyn(self) -> Box<dyn Lockable> {
        match self {
            Self::NoOp(l) => Box::new(l),
            Self::Exclusive(l) => Box::new(l),
            Self::Shared(l) => Box::new(l),
        }
    }
}

impl Default for LockStrategy {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}

impl From<StrategyType> for LockStrategy {
    fn from(strategy: StrategyType) -> Self {
        Self::new(strategy)
    }
}

impl Lockable for LockStrategy {
    #[inline(always)]
    fn lock(&self) {
        match self {
            Self::NoOp(l) => l.lock(),
            Self::Exclusive(l) => l.lock(),
            Self::Shared(l) => l.lock(),
        }
    }

    #[inline(always)]
    fn try_lock(&self) -> bool {
        match self {
            Self::NoOp(l) => l.try_lock(),
            Self::Exclusive(l) => l.try_lock(),
            Self::Shared(l) => l.try_lock(),
        }
    }

    #[inline(always)]
    unsafe fn unlock(&self) {
        // SAFETY: forwarded contract
        unsafe {
            match self {
                Self::NoOp(l) => l.unlock(),
                Self::Exclusive(l) => l.unlock(),
                Self::Shared(l) => l.unlock(),
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::NoOp(l) => l.name(),
            Self::Exclusive(l) => l.name(),
            Self::Shared(l) => l.name(),
        }
    }
}
