/*!
 * Guard Traits
 *
 * Core abstraction for RAII lock guards
 */

use super::GuardMetadata;
use std::time::Duration;

/// Core guard trait
///
/// Guards expose identification and timing only. Release happens in `Drop`
/// and nowhere else, so there is no manual `release` here.
pub trait Guard {
    /// Resource type name for logging/debugging
    fn resource_type(&self) -> &'static str;

    /// Get guard metadata
    fn metadata(&self) -> &GuardMetadata;

    /// Time since acquisition
    fn held_for(&self) -> Duration {
        self.metadata().lifetime()
    }
}
