//! The internal validation report produced by the orchestrator.
//!
//! This is the pre-contract aggregate: the contract crate maps it onto
//! the versioned external schema. Created fresh per call, immutable once
//! returned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::RuleCategory;
use super::violation::Violation;

/// How the engine disposed of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// The full rule pipeline ran.
    Completed,
    /// The item pipeline failed; scores are zeroed and one system
    /// violation carries the failure.
    Degraded,
    /// The item exceeded its time budget.
    TimedOut,
    /// The batch was cancelled before this item ran. Not an error and
    /// not counted in score statistics.
    Cancelled,
}

impl Disposition {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Degraded => "degraded",
            Self::TimedOut => "timed_out",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Per-phase wall-clock durations in microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub preprocessing_us: u64,
    pub rule_execution_us: u64,
    pub aggregation_us: u64,
}

/// Observability metadata attached to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub correlation_id: String,
    pub engine_version: String,
    pub profile_used: String,
    /// Unix timestamp in milliseconds at which validation started.
    pub timestamp_ms: u64,
    pub duration_ms: u64,
    pub phase_timings: PhaseTimings,
    pub disposition: Disposition,
    /// Rule ids excluded because a reviewer suppressed them for this
    /// definition. Empty for ordinary requests.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed_rules: Vec<String>,
}

/// The aggregate result of validating one definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Weighted ratio over all active rules, in `[0, 1]`.
    pub overall_score: f64,
    /// Hard gate and soft score combined: score above threshold AND no
    /// critical/error violation.
    pub is_acceptable: bool,
    /// All violations, ordered by (category, rule id, code, location).
    pub violations: Vec<Violation>,
    /// Ids of active rules that passed, sorted.
    pub passed_rules: Vec<String>,
    /// Weighted ratio per category, over active rules in that category
    /// only. Categories without active rules are absent.
    pub detailed_scores: BTreeMap<RuleCategory, f64>,
    /// Deduplicated suggestions drawn from violations, in violation order.
    pub improvement_suggestions: Vec<String>,
    pub system: SystemInfo,
}

impl ValidationReport {
    /// Whether any violation blocks acceptance on severity alone.
    pub fn has_blocking_violation(&self) -> bool {
        self.violations.iter().any(|v| v.severity.blocks_acceptance())
    }
}
