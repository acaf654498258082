//! Property tests: no-throw, idempotence, and scoring monotonicity.

use proptest::prelude::*;

use std::sync::Arc;

use smallvec::smallvec;
use toets_core::config::EngineConfig;
use toets_core::types::{
    PriorityTier, RuleCategory, RuleOutcome, Severity, Violation,
};
use toets_engine::executor::ExecutedRule;
use toets_engine::orchestrator::ValidationOrchestrator;
use toets_engine::scoring::ScoringAggregator;
use toets_engine::spec::{Applicability, RuleSpec};

fn orchestrator() -> ValidationOrchestrator {
    ValidationOrchestrator::new(EngineConfig::default()).unwrap()
}

fn spec(id: String, tier: PriorityTier) -> Arc<RuleSpec> {
    Arc::new(RuleSpec {
        id: id.clone(),
        category: RuleCategory::Structuur,
        priority_tier: tier,
        description: String::new(),
        example: None,
        applicability: Applicability::default(),
        version: "test".to_string(),
    })
}

fn tier_strategy() -> impl Strategy<Value = PriorityTier> {
    prop_oneof![
        Just(PriorityTier::Verplicht),
        Just(PriorityTier::Hoog),
        Just(PriorityTier::Medium),
        Just(PriorityTier::Laag),
    ]
}

/// A synthetic executed rule: tier plus pass/fail.
fn executed_strategy() -> impl Strategy<Value = Vec<(PriorityTier, bool)>> {
    prop::collection::vec((tier_strategy(), any::<bool>()), 1..24)
}

fn build_executed(rules: &[(PriorityTier, bool)]) -> Vec<ExecutedRule> {
    rules
        .iter()
        .enumerate()
        .map(|(i, (tier, passed))| {
            let id = format!("STR-{:02}", i + 1);
            let outcome = if *passed {
                RuleOutcome::passed(id.as_str(), 1)
            } else {
                let violation = Violation {
                    code: "test".to_string(),
                    rule_id: id.clone(),
                    category: RuleCategory::Structuur,
                    severity: Severity::Warning,
                    message: "test".to_string(),
                    location: None,
                    suggestions: Vec::new(),
                };
                RuleOutcome::failed(id.as_str(), smallvec![violation], 1)
            };
            ExecutedRule {
                spec: spec(id, *tier),
                outcome,
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// `validate_text` returns a finite, in-range score for any input.
    #[test]
    fn prop_no_throw_and_score_in_range(term in ".{0,40}", text in ".{0,400}") {
        let report = orchestrator().validate_text(&term, &text, None, None);
        prop_assert!(report.overall_score.is_finite());
        prop_assert!((0.0..=1.0).contains(&report.overall_score));
        for score in report.detailed_scores.values() {
            prop_assert!((0.0..=1.0).contains(score));
        }
    }

    /// Identical input yields identical results, volatile fields aside.
    #[test]
    fn prop_idempotent(term in "[a-zA-Z ]{1,30}", text in "[a-zA-Z0-9 .,]{0,200}") {
        let orchestrator = orchestrator();
        let a = orchestrator.validate_text(&term, &text, None, None);
        let b = orchestrator.validate_text(&term, &text, None, None);
        prop_assert_eq!(a.overall_score, b.overall_score);
        prop_assert_eq!(a.is_acceptable, b.is_acceptable);
        prop_assert_eq!(a.violations, b.violations);
        prop_assert_eq!(a.passed_rules, b.passed_rules);
    }

    /// Failing one more rule never raises the overall score, and a
    /// detected blocking violation always forces rejection.
    #[test]
    fn prop_monotonic_under_extra_failure(
        rules in executed_strategy(),
        flip_index in any::<prop::sample::Index>(),
    ) {
        let aggregator = ScoringAggregator::new(0.80);
        let executed = build_executed(&rules);
        let base = aggregator.aggregate(&executed);

        // Flip one passing rule to failing: a strict superset of the
        // original violation set.
        let mut worse_rules = rules.clone();
        let idx = flip_index.index(worse_rules.len());
        prop_assume!(worse_rules[idx].1);
        worse_rules[idx].1 = false;
        let worse = aggregator.aggregate(&build_executed(&worse_rules));

        prop_assert!(worse.overall_score <= base.overall_score + 1e-12);
    }

    /// Hard gate: a critical/error violation forces rejection at any score.
    #[test]
    fn prop_hard_gate(rules in executed_strategy()) {
        let mut executed = build_executed(&rules);
        // Make the first outcome an error-severity failure.
        let violation = Violation {
            code: "hard".to_string(),
            rule_id: "STR-99".to_string(),
            category: RuleCategory::Structuur,
            severity: Severity::Error,
            message: "hard".to_string(),
            location: None,
            suggestions: Vec::new(),
        };
        executed.push(ExecutedRule {
            spec: spec("STR-99".to_string(), PriorityTier::Laag),
            outcome: RuleOutcome::failed("STR-99", smallvec![violation], 1),
        });

        let breakdown = ScoringAggregator::new(0.0).aggregate(&executed);
        prop_assert!(!breakdown.is_acceptable);
    }
}

/// Batch length equals input length for arbitrary batch sizes.
#[test]
fn test_batch_length_invariant() {
    let orchestrator = orchestrator();
    for size in [0usize, 1, 2, 7, 33] {
        let requests: Vec<_> = (0..size)
            .map(|i| {
                toets_core::types::ValidationRequest::new(
                    format!("term{i}"),
                    "Een recht is een aanspraak die de wet aan een persoon toekent.",
                )
            })
            .collect();
        let reports = orchestrator.batch_validate(&requests, None);
        assert_eq!(reports.len(), size);
    }
}
