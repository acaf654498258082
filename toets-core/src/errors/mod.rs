//! Error handling for Toets.
//! One error enum per failure class, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod contract_error;
pub mod error_code;
pub mod execution_error;
pub mod orchestration_error;

pub use config_error::{ConfigError, SpecRecordError};
pub use contract_error::ContractError;
pub use error_code::ToetsErrorCode;
pub use execution_error::ExecutionError;
pub use orchestration_error::OrchestrationError;
