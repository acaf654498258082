//! Validation inputs: requests, definitions, and caller context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::collections::FxHashMap;
use super::domain::OntologicalCategory;

/// Caller-supplied context influencing rule applicability.
///
/// The named fields are the ones rules read; anything else the caller
/// sends is preserved in `extra` and ignored by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationContext {
    /// Statutory bases the definition should be anchored to
    /// (e.g. "Burgerlijk Wetboek Boek 3, artikel 260").
    pub wettelijke_grondslagen: Vec<String>,
    /// Organizational scope keywords for the defining organisation.
    pub organisatorische_context: Vec<String>,
    /// Rule ids a reviewer has suppressed for this definition.
    /// Suppressed rules are excluded from scoring like inapplicable ones.
    pub onderdrukte_regels: Vec<String>,
    /// Unrecognized context entries, preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: FxHashMap<String, Value>,
}

impl ValidationContext {
    /// Whether a context key is present, either as a named field with
    /// content or as an extra entry.
    pub fn has_key(&self, key: &str) -> bool {
        match key {
            "wettelijke_grondslagen" => !self.wettelijke_grondslagen.is_empty(),
            "organisatorische_context" => !self.organisatorische_context.is_empty(),
            _ => self.extra.contains_key(key),
        }
    }

    pub fn is_suppressed(&self, rule_id: &str) -> bool {
        self.onderdrukte_regels.iter().any(|r| r == rule_id)
    }
}

/// One validation request: the candidate text plus everything rules may
/// consult. This is the unit `batch_validate` operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The term being defined.
    pub term: String,
    /// The candidate definition text.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ontological_category: Option<OntologicalCategory>,
    #[serde(default)]
    pub context: ValidationContext,
    /// Caller-supplied correlation id; generated when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl ValidationRequest {
    pub fn new(term: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            text: text.into(),
            ontological_category: None,
            context: ValidationContext::default(),
            correlation_id: None,
        }
    }

    pub fn with_category(mut self, category: OntologicalCategory) -> Self {
        self.ontological_category = Some(category);
        self
    }

    pub fn with_context(mut self, context: ValidationContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }
}

/// A curated definition entity as stored by the surrounding system.
/// `validate_definition` adapts this to a [`ValidationRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definitie: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ontologische_categorie: Option<OntologicalCategory>,
    #[serde(default)]
    pub context: ValidationContext,
}

impl From<&Definition> for ValidationRequest {
    fn from(def: &Definition) -> Self {
        Self {
            term: def.term.clone(),
            text: def.definitie.clone(),
            ontological_category: def.ontologische_categorie,
            context: def.context.clone(),
            correlation_id: None,
        }
    }
}
