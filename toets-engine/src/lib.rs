//! Validation engine for Dutch legal/administrative definitions.
//!
//! Pipeline: [`spec::RuleSpecStore`] loads rule metadata, the
//! [`registry::RuleRegistry`] binds it 1:1 to implementations in
//! [`rules`], the [`executor::RuleExecutor`] runs the active rules, the
//! [`scoring::ScoringAggregator`] folds outcomes into scores and an
//! accept/reject decision, and the
//! [`orchestrator::ValidationOrchestrator`] ties it together per call
//! and per batch.

pub mod codes;
pub mod executor;
pub mod orchestrator;
pub mod registry;
pub mod rules;
pub mod scoring;
pub mod spec;

pub use registry::consistency;

/// Engine version stamped into every report's system block.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
