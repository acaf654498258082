//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::ToetsEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec.
/// Handlers that panic are caught so they never disturb validation.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ToetsEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn ToetsEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent
    /// handlers from receiving the event.
    fn emit<F: Fn(&dyn ToetsEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing");
            }
        }
    }

    pub fn emit_validation_started(&self, event: &ValidationStartedEvent) {
        self.emit(|h| h.on_validation_started(event));
    }

    pub fn emit_validation_completed(&self, event: &ValidationCompletedEvent) {
        self.emit(|h| h.on_validation_completed(event));
    }

    pub fn emit_rule_panicked(&self, event: &RulePanickedEvent) {
        self.emit(|h| h.on_rule_panicked(event));
    }

    pub fn emit_snapshot_swapped(&self, event: &SnapshotSwappedEvent) {
        self.emit(|h| h.on_snapshot_swapped(event));
    }

    pub fn emit_batch_completed(&self, event: &BatchCompletedEvent) {
        self.emit(|h| h.on_batch_completed(event));
    }
}
