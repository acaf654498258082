//! Rule execution errors — isolated to one rule, never fatal.

use super::error_code::{self, ToetsErrorCode};

/// Errors raised while executing a single rule.
///
/// These never reach the caller as errors: the executor converts them
/// into synthetic system-category violations on the rule's outcome.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Rule {id} panicked: {message}")]
    RulePanic { id: String, message: String },

    #[error("Rule {id} exceeded {timeout_ms}ms")]
    Timeout { id: String, timeout_ms: u64 },
}

impl ToetsErrorCode for ExecutionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RulePanic { .. } => error_code::EXECUTION_PANIC,
            Self::Timeout { .. } => error_code::EXECUTION_TIMEOUT,
        }
    }
}
