//! Orchestration errors — absorbed per item, never fatal to a batch.

use super::error_code::{self, ToetsErrorCode};

/// Errors escaping one item's validation pipeline.
///
/// `batch_validate` converts each of these into a degraded result at the
/// item's position; the batch itself always completes.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("Validation pipeline panicked: {message}")]
    ItemPanic { message: String },

    #[error("Item exceeded {timeout_ms}ms")]
    ItemTimeout { timeout_ms: u64 },

    #[error("Batch cancelled before item started")]
    Cancelled,
}

impl ToetsErrorCode for OrchestrationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemPanic { .. } => error_code::ORCHESTRATION_ITEM,
            Self::ItemTimeout { .. } => error_code::EXECUTION_TIMEOUT,
            Self::Cancelled => error_code::ORCHESTRATION_CANCELLED,
        }
    }
}
