//! ContractMapper — projects the internal report onto the external schema.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use toets_core::errors::ContractError;
use toets_core::types::{ValidationReport, Violation};

use crate::version::{ContractVersion, CONTRACT_VERSION};

/// Per-phase durations on the wire, microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContractPhaseTimings {
    pub preprocessing_us: u64,
    pub rule_execution_us: u64,
    pub aggregation_us: u64,
}

/// The `system` block of the external result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContractSystemBlock {
    pub correlation_id: String,
    pub engine_version: String,
    pub profile_used: String,
    /// Unix timestamp in milliseconds at which validation started.
    pub timestamp: u64,
    pub duration_ms: u64,
    pub phase_timings: ContractPhaseTimings,
    /// `completed`, `degraded`, `timed_out`, or `cancelled`.
    pub disposition: String,
    /// Added in 1.2.0.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed_rules: Vec<String>,
}

/// The semantically versioned validation result served to consumers.
///
/// Unknown fields are ignored on deserialization, so consumers built
/// against this version tolerate newer minor versions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VersionedValidationResult {
    /// Contract version, `major.minor.patch`.
    pub version: String,
    pub overall_score: f64,
    pub is_acceptable: bool,
    pub violations: Vec<Violation>,
    pub passed_rules: Vec<String>,
    /// Category name to weighted score.
    pub detailed_scores: BTreeMap<String, f64>,
    pub improvement_suggestions: Vec<String>,
    pub system: ContractSystemBlock,
}

/// Maps internal aggregation onto the versioned external contract.
///
/// A mapping that fails verification is a programming defect, surfaced
/// as [`ContractError`] and alerted distinctly from validation data.
#[derive(Debug, Default)]
pub struct ContractMapper;

impl ContractMapper {
    pub fn new() -> Self {
        Self
    }

    /// Map a report onto the current contract, verifying the result.
    pub fn map(&self, report: &ValidationReport) -> Result<VersionedValidationResult, ContractError> {
        let result = VersionedValidationResult {
            version: CONTRACT_VERSION.to_string(),
            overall_score: report.overall_score,
            is_acceptable: report.is_acceptable,
            violations: report.violations.clone(),
            passed_rules: report.passed_rules.clone(),
            detailed_scores: report
                .detailed_scores
                .iter()
                .map(|(category, score)| (category.name().to_string(), *score))
                .collect(),
            improvement_suggestions: report.improvement_suggestions.clone(),
            system: ContractSystemBlock {
                correlation_id: report.system.correlation_id.clone(),
                engine_version: report.system.engine_version.clone(),
                profile_used: report.system.profile_used.clone(),
                timestamp: report.system.timestamp_ms,
                duration_ms: report.system.duration_ms,
                phase_timings: ContractPhaseTimings {
                    preprocessing_us: report.system.phase_timings.preprocessing_us,
                    rule_execution_us: report.system.phase_timings.rule_execution_us,
                    aggregation_us: report.system.phase_timings.aggregation_us,
                },
                disposition: report.system.disposition.name().to_string(),
                suppressed_rules: report.system.suppressed_rules.clone(),
            },
        };
        self.verify(&result)?;
        Ok(result)
    }

    /// Map and serialize in one step.
    pub fn to_json(&self, report: &ValidationReport) -> Result<String, ContractError> {
        let result = self.map(report)?;
        serde_json::to_string(&result).map_err(|e| ContractError::Serialization {
            message: e.to_string(),
        })
    }

    /// Verify a result against the schema invariants of the current
    /// major version. Every check here is a field a consumer relies on.
    pub fn verify(&self, result: &VersionedValidationResult) -> Result<(), ContractError> {
        result
            .version
            .parse::<ContractVersion>()
            .map_err(|message| ContractError::SchemaViolation {
                field: "version".to_string(),
                message,
            })?;

        if !result.overall_score.is_finite()
            || !(0.0..=1.0).contains(&result.overall_score)
        {
            return Err(ContractError::SchemaViolation {
                field: "overall_score".to_string(),
                message: format!("must be a finite value in [0, 1], got {}", result.overall_score),
            });
        }

        for (category, score) in &result.detailed_scores {
            if !score.is_finite() || !(0.0..=1.0).contains(score) {
                return Err(ContractError::SchemaViolation {
                    field: format!("detailed_scores.{category}"),
                    message: format!("must be a finite value in [0, 1], got {score}"),
                });
            }
        }

        for (i, violation) in result.violations.iter().enumerate() {
            if violation.code.is_empty() || violation.rule_id.is_empty() {
                return Err(ContractError::SchemaViolation {
                    field: format!("violations[{i}]"),
                    message: "code and rule_id are required".to_string(),
                });
            }
            if violation.message.is_empty() {
                return Err(ContractError::SchemaViolation {
                    field: format!("violations[{i}].message"),
                    message: "message is required".to_string(),
                });
            }
        }

        const DISPOSITIONS: [&str; 4] = ["completed", "degraded", "timed_out", "cancelled"];
        if !DISPOSITIONS.contains(&result.system.disposition.as_str()) {
            return Err(ContractError::SchemaViolation {
                field: "system.disposition".to_string(),
                message: format!("unknown disposition '{}'", result.system.disposition),
            });
        }

        if result.system.correlation_id.is_empty() || result.system.engine_version.is_empty() {
            return Err(ContractError::SchemaViolation {
                field: "system".to_string(),
                message: "correlation_id and engine_version are required".to_string(),
            });
        }

        Ok(())
    }

    /// Health check for startup probes: map a canonical degenerate
    /// report and verify it. A failure means the build is unservable.
    pub fn health_check(&self) -> Result<(), ContractError> {
        use toets_core::types::{Disposition, PhaseTimings, SystemInfo};

        let canonical = ValidationReport {
            overall_score: 0.0,
            is_acceptable: false,
            violations: Vec::new(),
            passed_rules: Vec::new(),
            detailed_scores: BTreeMap::new(),
            improvement_suggestions: Vec::new(),
            system: SystemInfo {
                correlation_id: "health-check".to_string(),
                engine_version: "0.0.0".to_string(),
                profile_used: "standaard".to_string(),
                timestamp_ms: 0,
                duration_ms: 0,
                phase_timings: PhaseTimings::default(),
                disposition: Disposition::Completed,
                suppressed_rules: Vec::new(),
            },
        };
        self.map(&canonical).map(|_| ())
    }
}
