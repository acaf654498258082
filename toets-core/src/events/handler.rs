//! Event handler trait with no-op defaults.

use super::types::*;

/// Receives validation lifecycle events.
///
/// All methods default to no-ops so handlers implement only what they
/// observe. Handlers must not assume any ordering across batch items.
pub trait ToetsEventHandler: Send + Sync {
    fn on_validation_started(&self, event: &ValidationStartedEvent) {
        let _ = event;
    }

    fn on_validation_completed(&self, event: &ValidationCompletedEvent) {
        let _ = event;
    }

    fn on_rule_panicked(&self, event: &RulePanickedEvent) {
        let _ = event;
    }

    fn on_snapshot_swapped(&self, event: &SnapshotSwappedEvent) {
        let _ = event;
    }

    fn on_batch_completed(&self, event: &BatchCompletedEvent) {
        let _ = event;
    }
}
