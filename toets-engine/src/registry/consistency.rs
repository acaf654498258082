//! Offline spec↔implementation consistency report, for CI.
//!
//! Compares the compiled registration table against a rule corpus
//! without constructing a registry, so a pipeline can gate on drift
//! between what the rule authors wrote and what the engine ships.

use serde::Serialize;

use toets_core::types::collections::FxHashSet;

use crate::rules;
use crate::spec::RuleSpecStore;

/// Machine-readable consistency report.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub corpus_version: String,
    pub spec_count: usize,
    pub implementation_count: usize,
    /// Spec records without a matching implementation.
    pub specs_without_impl: Vec<String>,
    /// Implementations without a matching spec record.
    pub impls_without_spec: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.specs_without_impl.is_empty() && self.impls_without_spec.is_empty()
    }

    /// JSON rendering for pipeline consumption.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable rendering for CI logs.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Toetsregels consistentie (corpus {}): {} specs, {} implementaties\n",
            self.corpus_version, self.spec_count, self.implementation_count
        ));
        if self.is_consistent() {
            out.push_str("OK: elke regel is 1:1 gebonden.\n");
            return out;
        }
        for id in &self.specs_without_impl {
            out.push_str(&format!("ONTBREEKT: spec {id} heeft geen implementatie\n"));
        }
        for id in &self.impls_without_spec {
            out.push_str(&format!("ZWEEFT: implementatie {id} heeft geen spec\n"));
        }
        out
    }
}

/// Compare a rule corpus against the compiled implementation table.
pub fn consistency_report(store: &RuleSpecStore) -> ConsistencyReport {
    let impls = rules::implementations();
    let impl_ids: FxHashSet<&str> = impls.iter().map(|r| r.id()).collect();
    let spec_ids: FxHashSet<&str> = store.specs().iter().map(|s| s.id.as_str()).collect();

    let mut specs_without_impl: Vec<String> = spec_ids
        .difference(&impl_ids)
        .map(|id| id.to_string())
        .collect();
    let mut impls_without_spec: Vec<String> = impl_ids
        .difference(&spec_ids)
        .map(|id| id.to_string())
        .collect();
    specs_without_impl.sort();
    impls_without_spec.sort();

    ConsistencyReport {
        corpus_version: store.version().to_string(),
        spec_count: store.len(),
        implementation_count: impls.len(),
        specs_without_impl,
        impls_without_spec,
    }
}
