/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for toolkit operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Coarse error taxonomy
///
/// Precondition violations and capability mismatches are programming errors.
/// Broken channels and timeouts are ordinary outcomes callers are expected to
/// handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    PreconditionViolation,
    BrokenChannel,
    TimedOut,
    CapabilityMismatch,
    InvalidConfig,
}

/// Synchronization errors with diagnostics
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SyncError {
    #[error("Signal already completed")]
    #[diagnostic(
        code(sync::already_completed),
        help("A signal can be completed at most once. The first value is kept.")
    )]
    AlreadyCompleted,

    #[error("Signal value already consumed")]
    #[diagnostic(
        code(sync::already_consumed),
        help("The single receiver took the value. Use `share()` for multiple observers.")
    )]
    AlreadyConsumed,

    #[error("Reentrant acquisition of non-reentrant {strategy} lock")]
    #[diagnostic(
        code(sync::reentrant_lock),
        help("Internal operations must not call locking entry points of the same object.")
    )]
    ReentrantLock { strategy: String },

    #[error("Signal broken: sender dropped without completing")]
    #[diagnostic(
        code(sync::broken),
        help("The producer went away before completing. Treat the result as unavailable.")
    )]
    Broken,

    #[error("Wait timed out")]
    #[diagnostic(code(sync::timed_out))]
    TimedOut,

    #[error("Lock strategy '{strategy}' does not provide {required}")]
    #[diagnostic(
        code(sync::capability_mismatch),
        help("Known strategies: noop, exclusive, shared. Known notify styles: push, pull.")
    )]
    CapabilityMismatch { strategy: String, required: String },

    #[error("Invalid value '{value}' for {key}")]
    #[diagnostic(
        code(sync::invalid_config),
        help("Unset the variable to use the default, or supply a valid value.")
    )]
    InvalidConfig { key: String, value: String },
}

impl SyncError {
    /// Taxonomy bucket for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyCompleted | Self::AlreadyConsumed | Self::ReentrantLock { .. } => {
                ErrorKind::PreconditionViolation
            }
            Self::Broken => ErrorKind::BrokenChannel,
            Self::TimedOut => ErrorKind::TimedOut,
            Self::CapabilityMismatch { .. } => ErrorKind::CapabilityMismatch,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        matches!(self, Self::Broken)
    }

    /// Programming errors (never expected under correct usage)
    #[inline]
    pub fn is_precondition_violation(&self) -> bool {
        self.kind() == ErrorKind::PreconditionViolation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(SyncError::AlreadyCompleted.kind(), ErrorKind::PreconditionViolation);
        assert_eq!(SyncError::Broken.kind(), ErrorKind::BrokenChannel);
        assert_eq!(SyncError::TimedOut.kind(), ErrorKind::TimedOut);
        assert!(SyncError::ReentrantLock {
            strategy: "exclusive".into()
        }
        .is_precondition_violation());
        assert!(!SyncError::Broken.is_precondition_violation());
    }

    #[test]
    fn test_error_serialization() {
        let err = SyncError::CapabilityMismatch {
            strategy: "spin".into(),
            required: "lock/unlock".into(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("capability_mismatch"));

        let back: SyncError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(SyncError::TimedOut.to_string(), "Wait timed out");
        assert!(SyncError::ReentrantLock {
            strategy: "exclusive".into()
        }
        .to_string()
        .contains("exclusive"));
    }
}
