/*!
 * Ready Flag
 *
 * Push or pull readiness selected from configuration.
 *
 * # Design: Enum Dispatch
 *
 * Same approach as `LockStrategy`: a closed set of styles, one match per
 * call. Each variant owns its own flag, so the two styles never share a
 * predicate.
 */

use super::pull::PullSignal;
use super::push::PushSignal;
use super::traits::{ReadySignal, WaitStatus, WakeResult};
use crate::sync::config::{NotifyStyle, SyncConfig};
use std::time::Instant;

/// Readiness flag with a configurable notification style
#[derive(Debug)]
pub enum ReadyFlag {
    Push(PushSignal),
    Pull(PullSignal),
}

impl ReadyFlag {
    pub fn from_config(config: &SyncConfig) -> Self {
        match config.notify_style {
            NotifyStyle::Push => Self::Push(PushSignal::new()),
            NotifyStyle::Pull => Self::Pull(PullSignal::from_config(config)),
        }
    }

    pub fn new(style: NotifyStyle) -> Self {
        Self::from_config(&SyncConfig::default().with_notify_style(style))
    }

    pub fn style(&self) -> NotifyStyle {
        match self {
            Self::Push(_) => NotifyStyle::Push,
            Self::Pull(_) => NotifyStyle::Pull,
        }
    }
}

impl Default for ReadyFlag {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}

impl ReadySignal for ReadyFlag {
    #[inline(always)]
    fn signal(&self) -> WakeResult {
        match self {
            Self::Push(s) => s.signal(),
            Self::Pull(s) => s.signal(),
        }
    }

    #[inline(always)]
    fn is_signaled(&self) -> bool {
        match self {
            Self::Push(s) => s.is_signaled(),
            Self::Pull(s) => s.is_signaled(),
        }
    }

    #[inline(always)]
    fn wait(&self) {
        match self {
            Self::Push(s) => s.wait(),
            Self::Pull(s) => s.wait(),
        }
    }

    #[inline(always)]
    fn wait_until(&self, deadline: Instant) -> WaitStatus {
        match self {
            Self::Push(s) => s.wait_until(deadline),
            Self::Pull(s) => s.wait_until(deadline),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Push(s) => s.name(),
            Self::Pull(s) => s.name(),
        }
    }
}
