//! Core types, traits, errors, config, and events for the Toets engine.
//!
//! This crate owns everything shared between the rule engine and the
//! external contract: the violation/outcome data model, the error
//! taxonomy, layered configuration, and lifecycle events. It has no
//! knowledge of individual rules.

pub mod config;
pub mod errors;
pub mod events;
pub mod observability;
pub mod traits;
pub mod types;
