//! Golden corpus — the release gate for mapper and schema changes.
//!
//! A fixed set of inputs must keep validating against the current
//! schema after any mapper change. Volatile system fields are pinned
//! before mapping so the corpus stays comparable across runs.

use serde_json::{json, Value};

use toets_core::config::EngineConfig;
use toets_core::types::{OntologicalCategory, ValidationContext, ValidationReport};
use toets_contract::{ContractMapper, CONTRACT_VERSION};
use toets_engine::orchestrator::ValidationOrchestrator;

fn orchestrator() -> ValidationOrchestrator {
    ValidationOrchestrator::new(EngineConfig::default()).unwrap()
}

/// Pin the volatile observability fields so golden comparisons hold.
fn pin_volatile(report: &mut ValidationReport) {
    report.system.correlation_id = "golden".to_string();
    report.system.engine_version = "0.0.0-golden".to_string();
    report.system.timestamp_ms = 0;
    report.system.duration_ms = 0;
    report.system.phase_timings = Default::default();
}

fn golden_value(term: &str, text: &str, category: Option<OntologicalCategory>) -> Value {
    let mut report = orchestrator().validate_text(term, text, category, None);
    pin_volatile(&mut report);
    let json = ContractMapper::new().to_json(&report).unwrap();
    serde_json::from_str(&json).unwrap()
}

/// The corpus: one accepted definition, one circular rejection, one
/// short-text rejection, one category-gated case.
fn golden_corpus() -> Vec<(&'static str, Value)> {
    vec![
        (
            "accepted",
            golden_value(
                "hypotheek",
                "Een hypotheek is een beperkt recht op een registergoed dat strekt tot \
                 zekerheid voor de voldoening van een geldvordering.",
                None,
            ),
        ),
        (
            "circular",
            golden_value(
                "hypotheek",
                "Een hypotheek is een vorm van hypothecaire zekerheid.",
                None,
            ),
        ),
        ("too_short", golden_value("geld", "Geld zo.", None)),
        (
            "category_gated",
            golden_value(
                "hypotheekvorm",
                "Een hypotheekvorm is een soort zekerheidsrecht dat banken hanteren.",
                Some(OntologicalCategory::Type),
            ),
        ),
    ]
}

const REQUIRED_FIELDS: [&str; 8] = [
    "version",
    "overall_score",
    "is_acceptable",
    "violations",
    "passed_rules",
    "detailed_scores",
    "improvement_suggestions",
    "system",
];

const REQUIRED_SYSTEM_FIELDS: [&str; 7] = [
    "correlation_id",
    "engine_version",
    "profile_used",
    "timestamp",
    "duration_ms",
    "phase_timings",
    "disposition",
];

/// Producers never omit a field required in the current major version.
#[test]
fn test_golden_corpus_carries_all_required_fields() {
    for (name, value) in golden_corpus() {
        let object = value.as_object().unwrap_or_else(|| panic!("{name}: not an object"));
        for field in REQUIRED_FIELDS {
            assert!(object.contains_key(field), "{name}: missing '{field}'");
        }
        let system = object["system"].as_object().unwrap();
        for field in REQUIRED_SYSTEM_FIELDS {
            assert!(system.contains_key(field), "{name}: missing 'system.{field}'");
        }
        assert_eq!(object["version"], CONTRACT_VERSION, "{name}");
    }
}

#[test]
fn test_golden_corpus_is_stable_across_mappings() {
    let first = golden_corpus();
    let second = golden_corpus();
    for ((name, a), (_, b)) in first.iter().zip(second.iter()) {
        assert_eq!(a, b, "{name}: corpus output drifted between identical runs");
    }
}

#[test]
fn test_golden_accepted_shape() {
    let (_, value) = &golden_corpus()[0];
    assert_eq!(value["is_acceptable"], json!(true));
    assert_eq!(value["overall_score"], json!(1.0));
    assert_eq!(value["violations"], json!([]));
    assert_eq!(value["system"]["disposition"], json!("completed"));
    // All four categories scored 1.0 for the clean definition.
    assert_eq!(value["detailed_scores"]["structuur"], json!(1.0));
    assert_eq!(value["detailed_scores"]["verboden"], json!(1.0));
}

#[test]
fn test_golden_circular_shape() {
    let (_, value) = &golden_corpus()[1];
    assert_eq!(value["is_acceptable"], json!(false));
    let violations = value["violations"].as_array().unwrap();
    assert!(violations
        .iter()
        .any(|v| v["code"] == "circulaire-definitie" && v["rule_id"] == "ESS-01"));
    // The category-gated rules stay out of the scores entirely.
    assert!(value["detailed_scores"].as_object().unwrap().len() <= 4);
}

/// The fully predictable degenerate case, compared field by field.
#[test]
fn test_golden_zero_rules_exact() {
    let context = ValidationContext {
        onderdrukte_regels: {
            let orchestrator = orchestrator();
            let snapshot = orchestrator.registry().snapshot();
            snapshot
                .active_rules(None, &ValidationContext::default())
                .iter()
                .map(|r| r.spec.id.clone())
                .collect()
        },
        ..Default::default()
    };
    let mut report = orchestrator().validate_text(
        "hypotheek",
        "Een hypotheek is een beperkt recht.",
        None,
        Some(context),
    );
    pin_volatile(&mut report);
    report.system.suppressed_rules.clear();
    let value: Value =
        serde_json::from_str(&ContractMapper::new().to_json(&report).unwrap()).unwrap();

    let expected = json!({
        "version": CONTRACT_VERSION,
        "overall_score": 0.0,
        "is_acceptable": false,
        "violations": [{
            "code": "geen-regels-actief",
            "rule_id": "SYS",
            "category": "system",
            "severity": "error",
            "message": "Geen enkele toetsregel is van toepassing op deze context.",
        }],
        "passed_rules": [],
        "detailed_scores": {},
        "improvement_suggestions": [],
        "system": {
            "correlation_id": "golden",
            "engine_version": "0.0.0-golden",
            "profile_used": "standaard",
            "timestamp": 0,
            "duration_ms": 0,
            "phase_timings": {
                "preprocessing_us": 0,
                "rule_execution_us": 0,
                "aggregation_us": 0,
            },
            "disposition": "completed",
        },
    });
    assert_eq!(value, expected);
}
