//! Scoring aggregator — weighted scores and the accept/reject decision.
//!
//! Tier weights are fixed (verplicht 3.0, hoog 2.0, medium 1.0,
//! laag 0.5). Scoring is binary by default; graded rules contribute a
//! fraction of their weight. Acceptance combines a soft score threshold
//! with a hard severity gate.

use std::collections::BTreeMap;

use toets_core::types::collections::FxHashSet;
use toets_core::types::{RuleCategory, Severity, Violation};

use crate::codes;
use crate::executor::ExecutedRule;

/// The aggregate of one rule run, before orchestration metadata.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub overall_score: f64,
    pub is_acceptable: bool,
    pub detailed_scores: BTreeMap<RuleCategory, f64>,
    /// All violations, sorted by (category, rule id, code, location).
    pub violations: Vec<Violation>,
    /// Ids of rules that passed, sorted.
    pub passed_rules: Vec<String>,
    /// Deduplicated suggestions in violation order.
    pub improvement_suggestions: Vec<String>,
}

/// Folds executed rules into scores and a decision.
pub struct ScoringAggregator {
    threshold: f64,
}

impl ScoringAggregator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Aggregate outcomes of the active rule set.
    ///
    /// Zero active rules is a defined edge case: score 0.0, not
    /// acceptable, one system violation. Never NaN.
    pub fn aggregate(&self, executed: &[ExecutedRule]) -> ScoreBreakdown {
        if executed.is_empty() {
            return self.empty_rule_set();
        }

        let mut total_weight = 0.0;
        let mut total_earned = 0.0;
        let mut per_category: BTreeMap<RuleCategory, (f64, f64)> = BTreeMap::new();
        let mut violations: Vec<Violation> = Vec::new();
        let mut passed_rules: Vec<String> = Vec::new();

        for rule in executed {
            let weight = rule.spec.weight();
            let earned = weight * rule.outcome.clamped_contribution();
            total_weight += weight;
            total_earned += earned;

            let entry = per_category.entry(rule.spec.category).or_insert((0.0, 0.0));
            entry.0 += earned;
            entry.1 += weight;

            if rule.outcome.passed {
                passed_rules.push(rule.outcome.rule_id.clone());
            }
            violations.extend(rule.outcome.violations.iter().cloned());
        }

        // Weights are strictly positive, so total_weight > 0 here.
        let overall_score = total_earned / total_weight;
        let detailed_scores = per_category
            .into_iter()
            .map(|(category, (earned, weight))| (category, earned / weight))
            .collect();

        violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        passed_rules.sort();

        let has_blocking = violations.iter().any(|v| v.severity.blocks_acceptance());
        let is_acceptable = overall_score >= self.threshold && !has_blocking;

        let improvement_suggestions = collect_suggestions(&violations);

        ScoreBreakdown {
            overall_score,
            is_acceptable,
            detailed_scores,
            violations,
            passed_rules,
            improvement_suggestions,
        }
    }

    fn empty_rule_set(&self) -> ScoreBreakdown {
        let violation = Violation {
            code: codes::GEEN_REGELS_ACTIEF.to_string(),
            rule_id: codes::SYS_RULE_ID.to_string(),
            category: RuleCategory::System,
            severity: Severity::Error,
            message: "Geen enkele toetsregel is van toepassing op deze context.".to_string(),
            location: None,
            suggestions: Vec::new(),
        };
        ScoreBreakdown {
            overall_score: 0.0,
            is_acceptable: false,
            detailed_scores: BTreeMap::new(),
            violations: vec![violation],
            passed_rules: Vec::new(),
            improvement_suggestions: Vec::new(),
        }
    }
}

/// Suggestions from violations, deduplicated, in violation order.
fn collect_suggestions(violations: &[Violation]) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::new();
    for violation in violations {
        for suggestion in &violation.suggestions {
            if seen.insert(suggestion.as_str()) {
                out.push(suggestion.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use smallvec::smallvec;
    use toets_core::types::{PriorityTier, RuleOutcome};

    use crate::spec::{Applicability, RuleSpec};

    fn spec(id: &str, category: RuleCategory, tier: PriorityTier) -> Arc<RuleSpec> {
        Arc::new(RuleSpec {
            id: id.to_string(),
            category,
            priority_tier: tier,
            description: String::new(),
            example: None,
            applicability: Applicability::default(),
            version: "test".to_string(),
        })
    }

    fn passed(id: &str, category: RuleCategory, tier: PriorityTier) -> ExecutedRule {
        ExecutedRule {
            spec: spec(id, category, tier),
            outcome: RuleOutcome::passed(id, 1),
        }
    }

    fn failed(
        id: &str,
        category: RuleCategory,
        tier: PriorityTier,
        severity: Severity,
    ) -> ExecutedRule {
        let violation = Violation {
            code: "test".to_string(),
            rule_id: id.to_string(),
            category,
            severity,
            message: "test".to_string(),
            location: None,
            suggestions: Vec::new(),
        };
        ExecutedRule {
            spec: spec(id, category, tier),
            outcome: RuleOutcome::failed(id, smallvec![violation], 1),
        }
    }

    #[test]
    fn test_weighted_ratio() {
        // verplicht pass (3.0) + medium fail (1.0): 3.0 / 4.0 = 0.75
        let executed = vec![
            passed("STR-01", RuleCategory::Structuur, PriorityTier::Verplicht),
            failed(
                "STR-02",
                RuleCategory::Structuur,
                PriorityTier::Medium,
                Severity::Warning,
            ),
        ];
        let breakdown = ScoringAggregator::new(0.80).aggregate(&executed);
        assert!((breakdown.overall_score - 0.75).abs() < 1e-9);
        assert!(!breakdown.is_acceptable, "0.75 < 0.80");
    }

    #[test]
    fn test_hard_gate_blocks_high_score() {
        // 11 passes and 1 laag error: score far above threshold, still rejected.
        let mut executed: Vec<ExecutedRule> = (1..=11)
            .map(|i| {
                passed(
                    &format!("STR-{i:02}"),
                    RuleCategory::Structuur,
                    PriorityTier::Hoog,
                )
            })
            .collect();
        executed.push(failed(
            "VER-01",
            RuleCategory::Verboden,
            PriorityTier::Laag,
            Severity::Error,
        ));
        let breakdown = ScoringAggregator::new(0.80).aggregate(&executed);
        assert!(breakdown.overall_score > 0.9);
        assert!(!breakdown.is_acceptable);
    }

    #[test]
    fn test_warning_only_failures_can_be_accepted() {
        let executed = vec![
            passed("STR-01", RuleCategory::Structuur, PriorityTier::Verplicht),
            passed("ESS-01", RuleCategory::Essentie, PriorityTier::Verplicht),
            failed(
                "CON-10",
                RuleCategory::Consistentie,
                PriorityTier::Laag,
                Severity::Info,
            ),
        ];
        let breakdown = ScoringAggregator::new(0.80).aggregate(&executed);
        assert!((breakdown.overall_score - 6.0 / 6.5).abs() < 1e-9);
        assert!(breakdown.is_acceptable);
    }

    #[test]
    fn test_graded_contribution_scales_weight() {
        let mut graded = passed("ESS-11", RuleCategory::Essentie, PriorityTier::Medium);
        graded.outcome.passed = false;
        graded.outcome.score_contribution = 0.5;
        let executed = vec![
            passed("STR-01", RuleCategory::Structuur, PriorityTier::Medium),
            graded,
        ];
        let breakdown = ScoringAggregator::new(0.80).aggregate(&executed);
        // (1.0 + 0.5) / 2.0
        assert!((breakdown.overall_score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_zero_active_rules_edge_case() {
        let breakdown = ScoringAggregator::new(0.80).aggregate(&[]);
        assert_eq!(breakdown.overall_score, 0.0);
        assert!(!breakdown.is_acceptable);
        assert_eq!(breakdown.violations.len(), 1);
        assert_eq!(breakdown.violations[0].code, codes::GEEN_REGELS_ACTIEF);
        assert_eq!(breakdown.violations[0].category, RuleCategory::System);
        assert!(breakdown.overall_score.is_finite());
    }

    #[test]
    fn test_category_scores_per_category_denominator() {
        let executed = vec![
            passed("STR-01", RuleCategory::Structuur, PriorityTier::Hoog),
            failed(
                "VER-01",
                RuleCategory::Verboden,
                PriorityTier::Hoog,
                Severity::Error,
            ),
        ];
        let breakdown = ScoringAggregator::new(0.80).aggregate(&executed);
        assert_eq!(breakdown.detailed_scores[&RuleCategory::Structuur], 1.0);
        assert_eq!(breakdown.detailed_scores[&RuleCategory::Verboden], 0.0);
        assert!(!breakdown.detailed_scores.contains_key(&RuleCategory::Essentie));
    }
}
