//! Rule executor — panic isolation, stable ordering, timing.
//!
//! The executor wraps every rule call so nothing a rule does can abort
//! the run: a panic becomes a synthetic system violation on that rule's
//! outcome. Rules run in stable (category, id) order; the optional
//! parallel path re-collects in the same order, so results are
//! identical regardless of where they ran.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use smallvec::smallvec;

use toets_core::errors::{ExecutionError, ToetsErrorCode};
use toets_core::types::{
    OntologicalCategory, RuleCategory, RuleOutcome, Severity, ValidationContext, Violation,
};

use crate::codes;
use crate::registry::BoundRule;
use crate::rules::text::TextView;
use crate::rules::{RuleCheck, RuleInput, ViolationDraft};
use crate::spec::RuleSpec;

/// A rule outcome paired with the spec it was executed under, so the
/// aggregator can weigh it without a registry lookup.
#[derive(Clone)]
pub struct ExecutedRule {
    pub spec: Arc<RuleSpec>,
    pub outcome: RuleOutcome,
}

/// Executes the active rule set for one request.
pub struct RuleExecutor {
    parallel: bool,
}

impl RuleExecutor {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Run all active rules against one definition.
    ///
    /// Never fails: a panicking rule yields a failed outcome with one
    /// synthetic system violation.
    pub fn execute(
        &self,
        active: &[&BoundRule],
        term: &str,
        view: &TextView,
        category: Option<OntologicalCategory>,
        context: &ValidationContext,
    ) -> Vec<ExecutedRule> {
        let input = RuleInput {
            term,
            text: &view.raw,
            view,
            category,
            context,
        };

        if self.parallel && active.len() > 1 {
            // Order is preserved by the indexed collect; outcomes are
            // identical to the sequential path because rules are pure.
            active
                .par_iter()
                .map(|rule| run_one(rule, &input))
                .collect()
        } else {
            active.iter().map(|rule| run_one(rule, &input)).collect()
        }
    }
}

fn run_one(rule: &BoundRule, input: &RuleInput<'_>) -> ExecutedRule {
    let start = Instant::now();
    let result = catch_unwind(AssertUnwindSafe(|| rule.implementation.check(input)));
    let elapsed_us = start.elapsed().as_micros() as u64;

    let outcome = match result {
        Ok(check) => realize(&rule.spec, check, elapsed_us),
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            let error = ExecutionError::RulePanic {
                id: rule.spec.id.clone(),
                message: message.clone(),
            };
            tracing::error!(code = error.error_code(), %error, "rule isolated");
            RuleOutcome {
                rule_id: rule.spec.id.clone(),
                passed: false,
                score_contribution: 0.0,
                violations: smallvec![Violation {
                    code: codes::REGEL_PANIEK.to_string(),
                    rule_id: rule.spec.id.clone(),
                    category: RuleCategory::System,
                    severity: Severity::Error,
                    message: format!("Regel {} faalde intern: {message}", rule.spec.id),
                    location: None,
                    suggestions: Vec::new(),
                }],
                elapsed_us,
            }
        }
    };

    ExecutedRule {
        spec: rule.spec.clone(),
        outcome,
    }
}

/// Turn a raw [`RuleCheck`] into an outcome, attaching spec metadata to
/// every violation draft.
fn realize(spec: &RuleSpec, check: RuleCheck, elapsed_us: u64) -> RuleOutcome {
    let violations = check
        .violations
        .into_iter()
        .map(|draft| realize_violation(spec, draft))
        .collect();
    let score_contribution = match check.contribution {
        Some(c) => c,
        None if check.passed => 1.0,
        None => 0.0,
    };
    RuleOutcome {
        rule_id: spec.id.clone(),
        passed: check.passed,
        score_contribution,
        violations,
        elapsed_us,
    }
}

fn realize_violation(spec: &RuleSpec, draft: ViolationDraft) -> Violation {
    Violation {
        code: draft.code.to_string(),
        rule_id: spec.id.clone(),
        category: spec.category,
        severity: draft
            .severity
            .unwrap_or_else(|| spec.priority_tier.default_severity()),
        message: draft.message,
        location: draft.location,
        suggestions: draft.suggestions,
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "onbekende paniek".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toets_core::config::BindingMode;
    use toets_core::types::PriorityTier;

    use crate::registry::RuleRegistry;
    use crate::rules::{self, Rule};
    use crate::spec::{Applicability, RuleSpecStore};

    struct PanickingRule;

    impl Rule for PanickingRule {
        fn id(&self) -> &'static str {
            "STR-01"
        }

        fn check(&self, _input: &RuleInput<'_>) -> RuleCheck {
            panic!("kapotte regel");
        }
    }

    fn bound_panicking_rule() -> BoundRule {
        BoundRule {
            spec: Arc::new(RuleSpec {
                id: "STR-01".to_string(),
                category: RuleCategory::Structuur,
                priority_tier: PriorityTier::Hoog,
                description: "test".to_string(),
                example: None,
                applicability: Applicability::default(),
                version: "test".to_string(),
            }),
            implementation: Arc::new(PanickingRule),
        }
    }

    #[test]
    fn test_panic_becomes_system_violation() {
        let rule = bound_panicking_rule();
        let view = TextView::build("Een recht op een zaak.");
        let ctx = ValidationContext::default();
        let executor = RuleExecutor::new(false);

        let executed = executor.execute(&[&rule], "recht", &view, None, &ctx);

        assert_eq!(executed.len(), 1);
        let outcome = &executed[0].outcome;
        assert!(!outcome.passed);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].category, RuleCategory::System);
        assert_eq!(outcome.violations[0].code, codes::REGEL_PANIEK);
        assert!(outcome.violations[0].message.contains("kapotte regel"));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let store = RuleSpecStore::load_embedded().unwrap();
        let (snapshot, _) =
            RuleRegistry::bind(&store, rules::implementations(), BindingMode::Strikt).unwrap();
        let ctx = ValidationContext::default();
        let active = snapshot.active_rules(None, &ctx);
        let view = TextView::build("Een hypotheek is een vorm van hypothecaire zekerheid.");

        let seq = RuleExecutor::new(false).execute(&active, "hypotheek", &view, None, &ctx);
        let par = RuleExecutor::new(true).execute(&active, "hypotheek", &view, None, &ctx);

        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(par.iter()) {
            assert_eq!(a.outcome.rule_id, b.outcome.rule_id);
            assert_eq!(a.outcome.passed, b.outcome.passed);
            assert_eq!(a.outcome.violations.len(), b.outcome.violations.len());
        }
    }
}
