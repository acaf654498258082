//! Engine configuration with layered TOML resolution.

pub mod binding_config;
pub mod engine_config;
pub mod execution_config;
pub mod scoring_config;

pub use binding_config::{BindingConfig, BindingMode};
pub use engine_config::{EngineConfig, EngineOverrides};
pub use execution_config::ExecutionConfig;
pub use scoring_config::ScoringConfig;
