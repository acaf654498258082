//! Rule specification store.
//!
//! Rule metadata is authored externally (by rule authors, not
//! engineers) as TOML records. `load` validates every record and
//! collects **all** problems into a single [`ConfigError`], so a
//! corpus edit never has to be fixed one error at a time.

mod store;

pub use store::{RuleSpecStore, EMBEDDED_CORPUS};

use toets_core::types::{OntologicalCategory, PriorityTier, RuleCategory, ValidationContext};

/// Predicate deciding whether a rule applies to a request context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Applicability {
    /// When set, the rule only applies to these ontological categories.
    /// A request without a category never activates such a rule.
    pub ontological_categories: Option<Vec<OntologicalCategory>>,
    /// When set, the rule only applies if this context key is present
    /// and non-empty.
    pub requires_context: Option<String>,
}

impl Applicability {
    /// Evaluate the predicate for a request.
    pub fn matches(
        &self,
        category: Option<OntologicalCategory>,
        context: &ValidationContext,
    ) -> bool {
        if let Some(ref cats) = self.ontological_categories {
            match category {
                Some(c) if cats.contains(&c) => {}
                _ => return false,
            }
        }
        if let Some(ref key) = self.requires_context {
            if !context.has_key(key) {
                return false;
            }
        }
        true
    }

    /// Whether this rule applies unconditionally.
    pub fn is_unconditional(&self) -> bool {
        self.ontological_categories.is_none() && self.requires_context.is_none()
    }
}

/// Externally authored rule metadata. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    /// Category-scoped id, e.g. `ESS-02`.
    pub id: String,
    pub category: RuleCategory,
    pub priority_tier: PriorityTier,
    /// Human-readable description from the rule author.
    pub description: String,
    /// Optional example of a violating definition.
    pub example: Option<String>,
    pub applicability: Applicability,
    /// Corpus version the record was loaded from.
    pub version: String,
}

impl RuleSpec {
    /// Scoring weight derived from the priority tier.
    pub fn weight(&self) -> f64 {
        self.priority_tier.weight()
    }
}
