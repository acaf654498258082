//! Rule registry — binds specs to implementations, serves snapshots.
//!
//! The registry owns an immutable [`RuleSnapshot`] behind an
//! atomically swapped pointer. Readers always see a fully consistent
//! snapshot; `reload` publishes a new one only after binding succeeds,
//! so in-flight validations keep the snapshot they started with.

pub mod consistency;

use std::path::Path;
use std::sync::{Arc, RwLock};

use toets_core::config::{BindingConfig, BindingMode};
use toets_core::errors::ConfigError;
use toets_core::types::collections::FxHashMap;
use toets_core::types::{OntologicalCategory, ValidationContext};

use crate::rules::{self, Rule};
use crate::spec::{RuleSpec, RuleSpecStore};

/// One spec bound to its implementation. The load-time invariant:
/// exactly one implementation per spec and vice versa.
#[derive(Clone)]
pub struct BoundRule {
    pub spec: Arc<RuleSpec>,
    pub implementation: Arc<dyn Rule>,
}

/// Mismatches found during binding, tracked per direction.
#[derive(Debug, Clone, Default)]
pub struct BindingReport {
    /// Ids bound successfully.
    pub bound: Vec<String>,
    /// Spec records with no implementation.
    pub specs_without_impl: Vec<String>,
    /// Implementations with no spec record.
    pub impls_without_spec: Vec<String>,
}

impl BindingReport {
    pub fn is_complete(&self) -> bool {
        self.specs_without_impl.is_empty() && self.impls_without_spec.is_empty()
    }
}

/// An immutable, fully bound rule set. Read-only during validation and
/// shared freely across threads.
pub struct RuleSnapshot {
    rules: Vec<BoundRule>,
    corpus_version: String,
}

impl std::fmt::Debug for RuleSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSnapshot")
            .field("rules", &self.rules.len())
            .field("corpus_version", &self.corpus_version)
            .finish()
    }
}

impl RuleSnapshot {
    /// All bound rules in stable execution order: category, then id.
    pub fn rules(&self) -> &[BoundRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn corpus_version(&self) -> &str {
        &self.corpus_version
    }

    pub fn get(&self, id: &str) -> Option<&BoundRule> {
        self.rules.iter().find(|r| r.spec.id == id)
    }

    /// The rules active for a request: applicability holds and the rule
    /// is not suppressed by the caller. Rules excluded here leave both
    /// the numerator and the denominator of scoring.
    pub fn active_rules(
        &self,
        category: Option<OntologicalCategory>,
        context: &ValidationContext,
    ) -> Vec<&BoundRule> {
        self.rules
            .iter()
            .filter(|r| r.spec.applicability.matches(category, context))
            .filter(|r| !context.is_suppressed(&r.spec.id))
            .collect()
    }

    /// Rule ids that were applicable but suppressed by the caller.
    pub fn suppressed_rules(
        &self,
        category: Option<OntologicalCategory>,
        context: &ValidationContext,
    ) -> Vec<String> {
        self.rules
            .iter()
            .filter(|r| r.spec.applicability.matches(category, context))
            .filter(|r| context.is_suppressed(&r.spec.id))
            .map(|r| r.spec.id.clone())
            .collect()
    }
}

/// Binds rule specs to implementations and serves read-only snapshots.
pub struct RuleRegistry {
    snapshot: RwLock<Arc<RuleSnapshot>>,
}

impl RuleRegistry {
    /// Bind a spec store to the compiled implementation table.
    ///
    /// In strict mode any mismatch is fatal: the engine refuses to
    /// serve a partial rule set silently. In lenient mode mismatches
    /// are logged and unmatched rules excluded from the snapshot.
    pub fn bind(
        store: &RuleSpecStore,
        implementations: Vec<Box<dyn Rule>>,
        mode: BindingMode,
    ) -> Result<(RuleSnapshot, BindingReport), ConfigError> {
        let mut impls: FxHashMap<&'static str, Arc<dyn Rule>> = implementations
            .into_iter()
            .map(|r| {
                let id = r.id();
                (id, Arc::from(r))
            })
            .collect();

        let mut report = BindingReport::default();
        let mut rules = Vec::with_capacity(store.len());

        for spec in store.specs() {
            match impls.remove(spec.id.as_str()) {
                Some(implementation) => {
                    report.bound.push(spec.id.clone());
                    rules.push(BoundRule {
                        spec: Arc::new(spec.clone()),
                        implementation,
                    });
                }
                None => report.specs_without_impl.push(spec.id.clone()),
            }
        }
        report.impls_without_spec = impls.keys().map(|id| id.to_string()).collect();
        report.specs_without_impl.sort();
        report.impls_without_spec.sort();

        if !report.is_complete() {
            match mode {
                BindingMode::Strikt => {
                    return Err(ConfigError::BindingMismatch {
                        specs_without_impl: report.specs_without_impl.clone(),
                        impls_without_spec: report.impls_without_spec.clone(),
                    });
                }
                BindingMode::Soepel => {
                    tracing::warn!(
                        specs_without_impl = ?report.specs_without_impl,
                        impls_without_spec = ?report.impls_without_spec,
                        "rule binding incomplete; unmatched rules excluded"
                    );
                }
            }
        }

        // Stable execution order: category, then id. This makes the
        // violation list byte-for-byte reproducible for identical input.
        rules.sort_by(|a, b| {
            (a.spec.category, a.spec.id.as_str()).cmp(&(b.spec.category, b.spec.id.as_str()))
        });

        let snapshot = RuleSnapshot {
            rules,
            corpus_version: store.version().to_string(),
        };
        Ok((snapshot, report))
    }

    /// Build a registry from a binding config: the embedded corpus, or
    /// the corpus at `regels_pad` when set.
    pub fn from_config(config: &BindingConfig) -> Result<Self, ConfigError> {
        let store = match config.regels_pad {
            Some(ref path) => RuleSpecStore::load_from_path(Path::new(path))?,
            None => RuleSpecStore::load_embedded()?,
        };
        let (snapshot, _report) =
            Self::bind(&store, rules::implementations(), config.resolved_mode())?;
        Ok(Self::new(snapshot))
    }

    pub fn new(snapshot: RuleSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The current snapshot. Callers hold the `Arc` for the duration of
    /// a validation so a concurrent reload never changes their rule set
    /// mid-run.
    pub fn snapshot(&self) -> Arc<RuleSnapshot> {
        self.snapshot.read().expect("registry lock poisoned").clone()
    }

    /// Atomically replace the snapshot with a freshly bound rule set.
    /// On any binding error the old snapshot stays in place.
    pub fn reload(
        &self,
        store: &RuleSpecStore,
        implementations: Vec<Box<dyn Rule>>,
        mode: BindingMode,
    ) -> Result<BindingReport, ConfigError> {
        let (snapshot, report) = Self::bind(store, implementations, mode)?;
        *self.snapshot.write().expect("registry lock poisoned") = Arc::new(snapshot);
        tracing::info!(
            rules = report.bound.len(),
            "rule snapshot swapped"
        );
        Ok(report)
    }
}
