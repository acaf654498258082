//! Shared data model: categories, tiers, violations, outcomes, reports.

pub mod collections;
pub mod domain;
pub mod input;
pub mod report;
pub mod violation;

pub use domain::{OntologicalCategory, PriorityTier, RuleCategory, Severity};
pub use input::{Definition, ValidationContext, ValidationRequest};
pub use report::{Disposition, PhaseTimings, SystemInfo, ValidationReport};
pub use violation::{RuleOutcome, TextSpan, Violation};
