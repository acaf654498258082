//! Contract errors — always unexpected, alerted separately.

use super::error_code::{self, ToetsErrorCode};

/// The mapper could not produce a schema-valid external result.
///
/// This indicates a programming defect, not bad input data: consumers
/// alert on these distinctly from ordinary validation outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Contract field missing or invalid: {field}: {message}")]
    SchemaViolation { field: String, message: String },

    #[error("Contract serialization failed: {message}")]
    Serialization { message: String },
}

impl ToetsErrorCode for ContractError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaViolation { .. } => error_code::CONTRACT_SCHEMA,
            Self::Serialization { .. } => error_code::CONTRACT_SERIALIZATION,
        }
    }
}
