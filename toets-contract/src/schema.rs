//! JSON Schema export of the external contract.
//!
//! Consumers generate client types from this schema instead of
//! hand-writing them against examples.

use schemars::schema_for;

use toets_core::errors::ContractError;

use crate::mapper::VersionedValidationResult;

/// The JSON Schema of [`VersionedValidationResult`].
pub fn contract_schema() -> schemars::schema::RootSchema {
    schema_for!(VersionedValidationResult)
}

/// The schema as pretty-printed JSON, for publishing alongside a release.
pub fn contract_schema_json() -> Result<String, ContractError> {
    serde_json::to_string_pretty(&contract_schema()).map_err(|e| {
        ContractError::Serialization {
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_exports_required_fields() {
        let json = contract_schema_json().unwrap();
        for field in [
            "version",
            "overall_score",
            "is_acceptable",
            "violations",
            "passed_rules",
            "detailed_scores",
            "system",
        ] {
            assert!(json.contains(field), "schema is missing '{field}'");
        }
    }
}
