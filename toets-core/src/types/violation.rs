//! Violations and per-rule outcomes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::domain::{RuleCategory, Severity};

/// A character span within the definition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextSpan {
    /// Byte offset of the first offending character.
    pub start: usize,
    /// Byte offset one past the last offending character.
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A structured record explaining why a rule failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// Stable machine-readable code, e.g. `circulaire-definitie`.
    pub code: String,
    /// Id of the rule that produced this violation, or a `SYS-*` id for
    /// synthetic engine violations.
    pub rule_id: String,
    pub category: RuleCategory,
    pub severity: Severity,
    /// Human-readable explanation, in the rule authors' language.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<TextSpan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Violation {
    /// Ordering key for the stable-output contract:
    /// category, then rule id, then code, then location.
    pub fn sort_key(&self) -> (RuleCategory, &str, &str, usize) {
        (
            self.category,
            self.rule_id.as_str(),
            self.code.as_str(),
            self.location.map(|l| l.start).unwrap_or(0),
        )
    }
}

/// The result of executing one rule against one definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule_id: String,
    pub passed: bool,
    /// Fraction of the rule's weight earned, in `[0, 1]`.
    /// Binary rules report `1.0` on pass and `0.0` on fail; graded rules
    /// may report anything in between.
    pub score_contribution: f64,
    pub violations: SmallVec<[Violation; 2]>,
    /// Wall-clock execution time in microseconds.
    pub elapsed_us: u64,
}

impl RuleOutcome {
    /// A passing outcome with full contribution.
    pub fn passed(rule_id: impl Into<String>, elapsed_us: u64) -> Self {
        Self {
            rule_id: rule_id.into(),
            passed: true,
            score_contribution: 1.0,
            violations: SmallVec::new(),
            elapsed_us,
        }
    }

    /// A failing outcome with zero contribution.
    pub fn failed(
        rule_id: impl Into<String>,
        violations: SmallVec<[Violation; 2]>,
        elapsed_us: u64,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            passed: false,
            score_contribution: 0.0,
            violations,
            elapsed_us,
        }
    }

    /// Clamp the contribution into `[0, 1]`, mapping NaN to 0.0.
    /// Rule implementations cannot be trusted to stay in range.
    pub fn clamped_contribution(&self) -> f64 {
        if self.score_contribution.is_nan() {
            0.0
        } else {
            self.score_contribution.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_clamping() {
        let mut outcome = RuleOutcome::passed("STR-01", 10);
        outcome.score_contribution = 1.7;
        assert_eq!(outcome.clamped_contribution(), 1.0);
        outcome.score_contribution = -0.3;
        assert_eq!(outcome.clamped_contribution(), 0.0);
        outcome.score_contribution = f64::NAN;
        assert_eq!(outcome.clamped_contribution(), 0.0);
    }
}
