//! Orchestrator tests: accept/reject scenarios, failure isolation,
//! batch semantics, cancellation, and observability metadata.

use std::sync::Arc;

use toets_core::config::EngineConfig;
use toets_core::traits::{Cancellable, CancellationToken, TextNormalizer};
use toets_core::types::{
    Disposition, OntologicalCategory, RuleCategory, Severity, ValidationContext,
    ValidationRequest,
};
use toets_engine::codes;
use toets_engine::orchestrator::ValidationOrchestrator;

/// A definition that satisfies the whole corpus.
const GOEDE_DEFINITIE: &str = "Een hypotheek is een beperkt recht op een registergoed dat \
     strekt tot zekerheid voor de voldoening van een geldvordering.";

fn orchestrator() -> ValidationOrchestrator {
    ValidationOrchestrator::new(EngineConfig::default()).unwrap()
}

/// A normalizer that panics on a marker, to force an item-pipeline
/// failure that is not a rule failure.
struct ExplosieveNormalizer;

impl TextNormalizer for ExplosieveNormalizer {
    fn normalize(&self, text: &str) -> String {
        if text.contains("ONTPLOF") {
            panic!("normalizer kapot op dit item");
        }
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "explosief"
    }
}

/// A normalizer that stalls, to trip the per-item time budget.
struct TrageNormalizer;

impl TextNormalizer for TrageNormalizer {
    fn normalize(&self, text: &str) -> String {
        std::thread::sleep(std::time::Duration::from_millis(80));
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "traag"
    }
}

#[test]
fn test_clean_definition_is_accepted() {
    let report = orchestrator().validate_text("hypotheek", GOEDE_DEFINITIE, None, None);
    assert!(
        report.violations.is_empty(),
        "unexpected violations: {:?}",
        report.violations
    );
    assert_eq!(report.overall_score, 1.0);
    assert!(report.is_acceptable);
    assert_eq!(report.system.disposition, Disposition::Completed);
}

/// Scenario A: the term restated as its own synonym fails the
/// circularity rule (verplicht tier) and blocks acceptance.
#[test]
fn test_scenario_a_circular_definition_rejected() {
    let report = orchestrator().validate_text(
        "hypotheek",
        "Een hypotheek is een vorm van hypothecaire zekerheid.",
        None,
        None,
    );
    assert!(!report.is_acceptable);
    let circular = report
        .violations
        .iter()
        .find(|v| v.rule_id == "ESS-01")
        .expect("circularity violation present");
    assert_eq!(circular.code, "circulaire-definitie");
    assert!(circular.severity.blocks_acceptance());
    assert!(!report.passed_rules.contains(&"ESS-01".to_string()));
}

/// Scenario B: an 8-character text fails the minimum-length rule with
/// severity error, blocking acceptance regardless of other rules.
#[test]
fn test_scenario_b_minimum_length_blocks() {
    let report = orchestrator().validate_text("geld", "Geld zo.", None, None);
    let length = report
        .violations
        .iter()
        .find(|v| v.rule_id == "STR-03")
        .expect("length violation present");
    assert_eq!(length.code, "te-kort");
    assert_eq!(length.severity, Severity::Error);
    assert!(!report.is_acceptable);
}

/// Scenario C: one item's pipeline failing mid-batch degrades only that
/// position; neighbours keep their true results.
#[test]
fn test_scenario_c_item_failure_is_isolated() {
    let orchestrator = ValidationOrchestrator::new(EngineConfig::default())
        .unwrap()
        .with_normalizer(Arc::new(ExplosieveNormalizer));

    let requests = vec![
        ValidationRequest::new("hypotheek", GOEDE_DEFINITIE),
        ValidationRequest::new("kapot", "Dit item laat de pipeline ONTPLOF zien."),
        ValidationRequest::new("hypotheek", GOEDE_DEFINITIE),
    ];

    let reports = orchestrator.batch_validate(&requests, None);

    assert_eq!(reports.len(), 3, "len(output) == len(input)");

    assert!(reports[0].is_acceptable);
    assert!(reports[2].is_acceptable);

    let degraded = &reports[1];
    assert_eq!(degraded.overall_score, 0.0);
    assert!(!degraded.is_acceptable);
    assert_eq!(degraded.system.disposition, Disposition::Degraded);
    assert_eq!(degraded.violations.len(), 1);
    assert_eq!(degraded.violations[0].code, codes::ITEM_FOUT);
    assert_eq!(degraded.violations[0].category, RuleCategory::System);
    assert!(degraded.violations[0].message.contains("normalizer kapot"));
}

#[test]
fn test_batch_preserves_input_order() {
    let orchestrator = orchestrator();
    let requests: Vec<ValidationRequest> = (0..8)
        .map(|i| {
            ValidationRequest::new("hypotheek", GOEDE_DEFINITIE)
                .with_correlation_id(format!("item-{i}"))
        })
        .collect();

    let reports = orchestrator.batch_validate(&requests, None);

    let ids: Vec<&str> = reports
        .iter()
        .map(|r| r.system.correlation_id.as_str())
        .collect();
    let expected: Vec<String> = (0..8).map(|i| format!("item-{i}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_cancelled_batch_reports_distinct_outcome() {
    let orchestrator = orchestrator();
    let token = CancellationToken::new();
    token.cancel();

    let requests = vec![
        ValidationRequest::new("hypotheek", GOEDE_DEFINITIE),
        ValidationRequest::new("pand", GOEDE_DEFINITIE),
    ];
    let reports = orchestrator.batch_validate(&requests, Some(&token));

    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert_eq!(report.system.disposition, Disposition::Cancelled);
        assert_eq!(report.violations[0].code, codes::GEANNULEERD);
        // Cancelled is terminal but not an error.
        assert!(!report.violations[0].severity.blocks_acceptance());
        assert!(!report.is_acceptable);
    }
}

#[test]
fn test_item_over_time_budget_reports_timeout() {
    let config = EngineConfig::from_toml(
        r#"
[execution]
item_timeout_ms = 10
"#,
    )
    .unwrap();
    let orchestrator = ValidationOrchestrator::new(config)
        .unwrap()
        .with_normalizer(Arc::new(TrageNormalizer));

    let requests = vec![ValidationRequest::new("hypotheek", GOEDE_DEFINITIE)];
    let reports = orchestrator.batch_validate(&requests, None);

    assert_eq!(reports[0].system.disposition, Disposition::TimedOut);
    assert_eq!(reports[0].violations[0].code, codes::TIJDSLIMIET);
    assert_eq!(reports[0].overall_score, 0.0);
    assert!(!reports[0].is_acceptable);
}

/// A rule inapplicable to the context appears nowhere: not in
/// passed_rules, not in violations, not in the category denominator.
#[test]
fn test_category_exclusion_is_complete() {
    let orchestrator = orchestrator();

    // ESS-04 (proces phrasing) is inactive for a type definition.
    let report = orchestrator.validate_text(
        "hypotheekvorm",
        "Een hypotheekvorm is een soort zekerheidsrecht dat banken hanteren.",
        Some(OntologicalCategory::Type),
        None,
    );

    assert!(!report.passed_rules.contains(&"ESS-04".to_string()));
    assert!(report.violations.iter().all(|v| v.rule_id != "ESS-04"));

    // The same text without a category: gated rules drop out entirely.
    let without = orchestrator.validate_text(
        "hypotheekvorm",
        "Een hypotheekvorm is een soort zekerheidsrecht dat banken hanteren.",
        None,
        None,
    );
    assert!(!without.passed_rules.contains(&"ESS-06".to_string()));
    assert!(report.passed_rules.contains(&"ESS-06".to_string()));
}

#[test]
fn test_suppressed_rules_are_excluded_and_surfaced() {
    let orchestrator = orchestrator();
    let context = ValidationContext {
        onderdrukte_regels: vec!["ESS-01".to_string()],
        ..Default::default()
    };

    let report = orchestrator.validate_text(
        "hypotheek",
        "Een hypotheek is een vorm van hypothecaire zekerheid.",
        None,
        Some(context),
    );

    assert!(report.violations.iter().all(|v| v.rule_id != "ESS-01"));
    assert!(!report.passed_rules.contains(&"ESS-01".to_string()));
    assert_eq!(report.system.suppressed_rules, vec!["ESS-01".to_string()]);
}

#[test]
fn test_zero_active_rules_yields_defined_result() {
    let orchestrator = orchestrator();
    // Suppress every rule that would be active for a bare request.
    let snapshot = orchestrator.registry().snapshot();
    let all_active: Vec<String> = snapshot
        .active_rules(None, &ValidationContext::default())
        .iter()
        .map(|r| r.spec.id.clone())
        .collect();
    let context = ValidationContext {
        onderdrukte_regels: all_active,
        ..Default::default()
    };

    let report = orchestrator.validate_text("hypotheek", GOEDE_DEFINITIE, None, Some(context));

    assert_eq!(report.overall_score, 0.0);
    assert!(report.overall_score.is_finite());
    assert!(!report.is_acceptable);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].code, codes::GEEN_REGELS_ACTIEF);
}

#[test]
fn test_idempotence_modulo_volatile_fields() {
    let orchestrator = orchestrator();
    let context = ValidationContext::default();
    let a = orchestrator.validate_text(
        "hypotheek",
        "Een hypotheek is een vorm van hypothecaire zekerheid.",
        None,
        Some(context.clone()),
    );
    let b = orchestrator.validate_text(
        "hypotheek",
        "Een hypotheek is een vorm van hypothecaire zekerheid.",
        None,
        Some(context),
    );

    assert_eq!(a.overall_score, b.overall_score);
    assert_eq!(a.is_acceptable, b.is_acceptable);
    assert_eq!(a.passed_rules, b.passed_rules);
    assert_eq!(a.detailed_scores, b.detailed_scores);
    assert_eq!(a.violations, b.violations);
    assert_eq!(a.improvement_suggestions, b.improvement_suggestions);
    // Volatile by design: correlation id, timestamps, durations.
    assert_ne!(a.system.correlation_id, b.system.correlation_id);
}

#[test]
fn test_validate_definition_adapts_entity() {
    use toets_core::types::Definition;

    let definition = Definition {
        term: "hypotheek".to_string(),
        definitie: GOEDE_DEFINITIE.to_string(),
        ontologische_categorie: None,
        context: ValidationContext::default(),
    };
    let report = orchestrator().validate_definition(&definition);
    assert!(report.is_acceptable);
}

#[test]
fn test_system_metadata_present() {
    let report = orchestrator().validate_text("hypotheek", GOEDE_DEFINITIE, None, None);
    assert!(report.system.correlation_id.starts_with("tv-"));
    assert_eq!(report.system.engine_version, toets_engine::ENGINE_VERSION);
    assert_eq!(report.system.profile_used, "standaard");
    assert!(report.system.timestamp_ms > 0);
}

#[test]
fn test_caller_supplied_correlation_id_is_echoed() {
    let orchestrator = orchestrator();
    let request = ValidationRequest::new("hypotheek", GOEDE_DEFINITIE)
        .with_correlation_id("ui-4711");
    let report = orchestrator.validate_request(&request);
    assert_eq!(report.system.correlation_id, "ui-4711");
}

/// The no-throw guarantee on hostile inputs.
#[test]
fn test_validate_text_never_raises() {
    let orchestrator = orchestrator();
    let hostile = [
        "",
        " ",
        "\u{0000}",
        "🦀🦀🦀",
        "Een \u{202e}recht\u{202c} op een zaak.",
        &"a".repeat(100_000),
    ];
    for text in hostile {
        let report = orchestrator.validate_text("term", text, None, None);
        assert!(report.overall_score.is_finite());
    }
}

#[test]
fn test_streng_profile_rejects_borderline_score() {
    // A definition with only a laag/info failure: high score, no
    // blocking severity.
    let text = "Een pandrecht is een beperkt recht dat strekt tot zekerheid voor een vordering";
    let standaard = orchestrator().validate_text("pandrecht", text, None, None);
    assert!(
        standaard.violations.iter().all(|v| !v.severity.blocks_acceptance()),
        "fixture must only fail non-blocking rules: {:?}",
        standaard.violations
    );
    assert!(standaard.is_acceptable);

    let streng_config = EngineConfig::from_toml(
        r#"
[scoring]
profile = "streng"
threshold = 0.999
"#,
    )
    .unwrap();
    let streng = ValidationOrchestrator::new(streng_config).unwrap();
    let report = streng.validate_text("pandrecht", text, None, None);
    assert_eq!(report.system.profile_used, "streng");
    assert!(!report.is_acceptable, "score {} under 0.999", report.overall_score);
}
