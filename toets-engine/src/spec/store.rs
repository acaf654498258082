//! TOML-backed rule spec loading with collect-all error reporting.

use std::path::Path;

use toets_core::errors::{ConfigError, SpecRecordError};
use toets_core::types::collections::FxHashSet;
use toets_core::types::{OntologicalCategory, PriorityTier, RuleCategory};

use super::{Applicability, RuleSpec};

/// The rule corpus shipped with the engine. Overridable via
/// `binding.regels_pad` for staged rollouts.
pub const EMBEDDED_CORPUS: &str = include_str!("regels.toml");

/// Loads and schema-validates rule metadata from TOML.
#[derive(Debug)]
pub struct RuleSpecStore {
    specs: Vec<RuleSpec>,
    version: String,
}

impl RuleSpecStore {
    /// Load the embedded rule corpus.
    pub fn load_embedded() -> Result<Self, ConfigError> {
        Self::load_from_str(EMBEDDED_CORPUS, "<ingebouwd>")
    }

    /// Load a rule corpus from a file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;
        Self::load_from_str(&content, &path.display().to_string())
    }

    /// Parse and validate all rule records.
    ///
    /// Malformed records never short-circuit: every offending record is
    /// collected and reported in one `ConfigError`.
    pub fn load_from_str(content: &str, source: &str) -> Result<Self, ConfigError> {
        let doc: toml::Value =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        let version = doc
            .get("versie")
            .and_then(|v| v.as_str())
            .unwrap_or("0")
            .to_string();

        let records = match doc.get("regel").and_then(|v| v.as_array()) {
            Some(records) => records,
            None => {
                return Err(ConfigError::ParseError {
                    path: source.to_string(),
                    message: "geen [[regel]] records gevonden".to_string(),
                })
            }
        };

        let mut errors: Vec<SpecRecordError> = Vec::new();
        let mut seen_ids: FxHashSet<String> = FxHashSet::default();
        let mut specs = Vec::with_capacity(records.len());

        for record in records {
            match parse_record(record, &version, &mut seen_ids) {
                Ok(spec) => specs.push(spec),
                Err(mut record_errors) => errors.append(&mut record_errors),
            }
        }

        if !errors.is_empty() {
            return Err(ConfigError::MalformedSpecRecords { errors });
        }

        tracing::debug!(count = specs.len(), version = %version, "rule corpus loaded");
        Ok(Self { specs, version })
    }

    pub fn specs(&self) -> &[RuleSpec] {
        &self.specs
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Parse one `[[regel]]` record, reporting every problem it has.
fn parse_record(
    record: &toml::Value,
    corpus_version: &str,
    seen_ids: &mut FxHashSet<String>,
) -> Result<RuleSpec, Vec<SpecRecordError>> {
    let mut errors = Vec::new();

    let id = match record.get("id").and_then(|v| v.as_str()) {
        Some(id) if is_valid_id(id) => id.to_string(),
        Some(id) => {
            errors.push(SpecRecordError {
                id: id.to_string(),
                field: "id".to_string(),
                message: "verwacht formaat AAA-00".to_string(),
            });
            id.to_string()
        }
        None => {
            errors.push(SpecRecordError {
                id: "<onbekend>".to_string(),
                field: "id".to_string(),
                message: "ontbreekt of is geen string".to_string(),
            });
            "<onbekend>".to_string()
        }
    };

    if !seen_ids.insert(id.clone()) {
        errors.push(SpecRecordError {
            id: id.clone(),
            field: "id".to_string(),
            message: "dubbel gedefinieerd".to_string(),
        });
    }

    let category = match record.get("categorie").and_then(|v| v.as_str()) {
        Some(c) => match RuleCategory::parse_assignable(c) {
            Some(cat) => Some(cat),
            None => {
                errors.push(SpecRecordError {
                    id: id.clone(),
                    field: "categorie".to_string(),
                    message: format!("onbekende categorie '{c}'"),
                });
                None
            }
        },
        None => {
            errors.push(SpecRecordError {
                id: id.clone(),
                field: "categorie".to_string(),
                message: "ontbreekt of is geen string".to_string(),
            });
            None
        }
    };

    let tier = match record.get("prioriteit").and_then(|v| v.as_str()) {
        Some(t) => match PriorityTier::parse(t) {
            Some(tier) => Some(tier),
            None => {
                errors.push(SpecRecordError {
                    id: id.clone(),
                    field: "prioriteit".to_string(),
                    message: format!("onbekende prioriteit '{t}'"),
                });
                None
            }
        },
        None => {
            errors.push(SpecRecordError {
                id: id.clone(),
                field: "prioriteit".to_string(),
                message: "ontbreekt of is geen string".to_string(),
            });
            None
        }
    };

    let description = match record.get("beschrijving").and_then(|v| v.as_str()) {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => {
            errors.push(SpecRecordError {
                id: id.clone(),
                field: "beschrijving".to_string(),
                message: "ontbreekt of is leeg".to_string(),
            });
            String::new()
        }
    };

    let example = record
        .get("voorbeeld")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let ontological_categories = match record.get("van_toepassing_op") {
        None => None,
        Some(value) => match value.as_array() {
            Some(entries) => {
                let mut cats = Vec::new();
                for entry in entries {
                    match entry.as_str().and_then(OntologicalCategory::parse) {
                        Some(cat) => cats.push(cat),
                        None => errors.push(SpecRecordError {
                            id: id.clone(),
                            field: "van_toepassing_op".to_string(),
                            message: format!("onbekende ontologische categorie '{entry}'"),
                        }),
                    }
                }
                Some(cats)
            }
            None => {
                errors.push(SpecRecordError {
                    id: id.clone(),
                    field: "van_toepassing_op".to_string(),
                    message: "moet een lijst van categorieën zijn".to_string(),
                });
                None
            }
        },
    };

    let requires_context = record
        .get("vereist_context")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RuleSpec {
        id,
        // Both unwraps guarded by the errors check above.
        category: category.expect("validated"),
        priority_tier: tier.expect("validated"),
        description,
        example,
        applicability: Applicability {
            ontological_categories,
            requires_context,
        },
        version: corpus_version.to_string(),
    })
}

/// Rule ids are category-scoped: three uppercase letters, a dash, two digits.
fn is_valid_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 6
        && bytes[0..3].iter().all(|b| b.is_ascii_uppercase())
        && bytes[3] == b'-'
        && bytes[4..6].iter().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        assert!(is_valid_id("STR-01"));
        assert!(is_valid_id("VER-14"));
        assert!(!is_valid_id("STR-1"));
        assert!(!is_valid_id("str-01"));
        assert!(!is_valid_id("STR_01"));
        assert!(!is_valid_id("STRUC-01"));
    }

    #[test]
    fn test_collects_all_errors_not_just_first() {
        let corpus = r#"
versie = "test"

[[regel]]
id = "STR-01"
categorie = "structuur"
prioriteit = "hoog"
beschrijving = "geldig record"

[[regel]]
id = "slecht"
categorie = "bestaat-niet"
prioriteit = "hoog"
beschrijving = "twee fouten in één record"

[[regel]]
id = "VER-01"
categorie = "verboden"
prioriteit = "extreem"
beschrijving = ""
"#;
        let err = RuleSpecStore::load_from_str(corpus, "<test>").unwrap_err();
        match err {
            ConfigError::MalformedSpecRecords { errors } => {
                // record 2: bad id + bad category; record 3: bad tier + empty description
                assert_eq!(errors.len(), 4, "all errors reported: {errors:?}");
            }
            other => panic!("expected MalformedSpecRecords, got {other}"),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let corpus = r#"
[[regel]]
id = "STR-01"
categorie = "structuur"
prioriteit = "hoog"
beschrijving = "eerste"

[[regel]]
id = "STR-01"
categorie = "structuur"
prioriteit = "laag"
beschrijving = "tweede"
"#;
        let err = RuleSpecStore::load_from_str(corpus, "<test>").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSpecRecords { .. }));
    }

    #[test]
    fn test_embedded_corpus_parses() {
        let store = RuleSpecStore::load_embedded().unwrap();
        assert_eq!(store.len(), 46);
    }
}
