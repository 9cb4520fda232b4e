/*!
 * Strategized Locking
 *
 * Owns exactly one lock strategy and hands out scope guards over it.
 */

use super::dispatch::LockStrategy;
use super::traits::Lockable;
use crate::guard::ScopeGuard;
use crate::sync::config::{StrategyType, SyncConfig};

/// Locking context parameterized by strategy
///
/// # Type Parameters
///
/// - `L`: the strategy. A concrete type (`ExclusiveLock`, ...) fixes it at
///   compile time; `LockStrategy` or `Box<dyn Lockable>` defer it to runtime.
///
/// # Examples
///
/// ```
/// use sync_toolkit::sync::strategy::{ExclusiveLock, StrategizedLocking};
/// use sync_toolkit::sync::StrategyType;
///
/// // Compile-time choice
/// let fixed = StrategizedLocking::new(ExclusiveLock::new());
/// {
///     let _guard = fixed.lock();
///     // critical section
/// }
///
/// // Runtime choice
/// let chosen = StrategizedLocking::from_type(StrategyType::Shared);
/// assert_eq!(chosen.strategy_name(), "shared");
/// ```
#[derive(Debug, Default)]
pub struct StrategizedLocking<L: Lockable = LockStrategy> {
    lock: L,
}

impl<L: Lockable> StrategizedLocking<L> {
    pub const fn new(lock: L) -> Self {
        Self { lock }
    }

    /// Acquire for the lifetime of the returned guard
    #[inline]
    pub fn lock(&self) -> ScopeGuard<'_, L> {
        ScopeGuard::acquire(&self.lock)
    }

    #[inline]
    pub fn try_lock(&self) -> Option<ScopeGuard<'_, L>> {
        ScopeGuard::try_acquire(&self.lock)
    }

    /// Run `f` with the lock held
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock();
        f()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.lock.name()
    }

    pub fn strategy(&self) -> &L {
        &self.lock
    }

    pub fn into_inner(self) -> L {
        self.lock
    }
}

impl StrategizedLocking<LockStrategy> {
    pub fn from_type(strategy: StrategyType) -> Self {
        Self::new(LockStrategy::new(strategy))
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(LockStrategy::from_config(config))
    }
}

impl StrategizedLocking<Box<dyn Lockable>> {
    /// Trait-object form (one indirection per call)
    pub fn dynamic(lock: impl Lockable + 'static) -> Self {
        Self::new(Box::new(lock))
    }
}
