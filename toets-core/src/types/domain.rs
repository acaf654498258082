//! Domain enums: rule categories, priority tiers, severities,
//! ontological categories.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Severity of a violation.
///
/// `Critical` and `Error` block acceptance regardless of the overall
/// score (hard gate); `Warning` and `Info` only affect the score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Whether this severity blocks acceptance on its own.
    pub fn blocks_acceptance(&self) -> bool {
        matches!(self, Self::Critical | Self::Error)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Grouping of rules, as the rule authors name them.
///
/// `System` is reserved for synthetic engine violations (panics,
/// timeouts, empty rule sets) and can never be assigned to a rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Structuur,
    Essentie,
    Consistentie,
    Verboden,
    System,
}

impl RuleCategory {
    /// Categories a rule may belong to (everything except `System`).
    pub const ASSIGNABLE: [RuleCategory; 4] = [
        Self::Structuur,
        Self::Essentie,
        Self::Consistentie,
        Self::Verboden,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Structuur => "structuur",
            Self::Essentie => "essentie",
            Self::Consistentie => "consistentie",
            Self::Verboden => "verboden",
            Self::System => "system",
        }
    }

    /// Parse a category as written in rule configuration.
    /// `system` is intentionally not accepted here.
    pub fn parse_assignable(s: &str) -> Option<Self> {
        match s {
            "structuur" => Some(Self::Structuur),
            "essentie" => Some(Self::Essentie),
            "consistentie" => Some(Self::Consistentie),
            "verboden" => Some(Self::Verboden),
            _ => None,
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weight class controlling how strongly a rule affects the score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Verplicht,
    Hoog,
    Medium,
    Laag,
}

impl PriorityTier {
    /// Fixed scoring weight for this tier.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Verplicht => 3.0,
            Self::Hoog => 2.0,
            Self::Medium => 1.0,
            Self::Laag => 0.5,
        }
    }

    /// Default violation severity for rules in this tier.
    /// Individual rules may override per violation.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::Verplicht => Severity::Error,
            Self::Hoog => Severity::Error,
            Self::Medium => Severity::Warning,
            Self::Laag => Severity::Info,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Verplicht => "verplicht",
            Self::Hoog => "hoog",
            Self::Medium => "medium",
            Self::Laag => "laag",
        }
    }

    /// Parse a tier as written in rule configuration.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "verplicht" => Some(Self::Verplicht),
            "hoog" => Some(Self::Hoog),
            "medium" => Some(Self::Medium),
            "laag" => Some(Self::Laag),
            _ => None,
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of the term being defined.
/// Activates category-specific phrasing rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OntologicalCategory {
    Proces,
    Type,
    Resultaat,
    Exemplaar,
}

impl OntologicalCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Proces => "proces",
            Self::Type => "type",
            Self::Resultaat => "resultaat",
            Self::Exemplaar => "exemplaar",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proces" => Some(Self::Proces),
            "type" => Some(Self::Type),
            "resultaat" => Some(Self::Resultaat),
            "exemplaar" => Some(Self::Exemplaar),
            _ => None,
        }
    }
}

impl fmt::Display for OntologicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_weights() {
        assert_eq!(PriorityTier::Verplicht.weight(), 3.0);
        assert_eq!(PriorityTier::Hoog.weight(), 2.0);
        assert_eq!(PriorityTier::Medium.weight(), 1.0);
        assert_eq!(PriorityTier::Laag.weight(), 0.5);
    }

    #[test]
    fn test_severity_hard_gate() {
        assert!(Severity::Critical.blocks_acceptance());
        assert!(Severity::Error.blocks_acceptance());
        assert!(!Severity::Warning.blocks_acceptance());
        assert!(!Severity::Info.blocks_acceptance());
    }

    #[test]
    fn test_system_category_not_assignable() {
        assert_eq!(RuleCategory::parse_assignable("system"), None);
        assert_eq!(
            RuleCategory::parse_assignable("verboden"),
            Some(RuleCategory::Verboden)
        );
    }
}
