//! Event payload types for the validation lifecycle.

/// Payload for `on_validation_started`.
#[derive(Debug, Clone)]
pub struct ValidationStartedEvent {
    pub correlation_id: String,
    pub term: String,
}

/// Payload for `on_validation_completed`.
#[derive(Debug, Clone)]
pub struct ValidationCompletedEvent {
    pub correlation_id: String,
    pub overall_score: f64,
    pub is_acceptable: bool,
    pub violation_count: usize,
    pub duration_ms: u64,
}

/// Payload for `on_rule_panicked`.
#[derive(Debug, Clone)]
pub struct RulePanickedEvent {
    pub correlation_id: String,
    pub rule_id: String,
    pub message: String,
}

/// Payload for `on_snapshot_swapped`.
#[derive(Debug, Clone)]
pub struct SnapshotSwappedEvent {
    pub rule_count: usize,
    pub excluded_count: usize,
}

/// Payload for `on_batch_completed`.
#[derive(Debug, Clone)]
pub struct BatchCompletedEvent {
    pub item_count: usize,
    pub degraded_count: usize,
    pub cancelled_count: usize,
    pub duration_ms: u64,
}
