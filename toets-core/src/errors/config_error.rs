//! Configuration errors — fatal at load time in strict mode.

use std::fmt;

use super::error_code::{self, ToetsErrorCode};

/// A single malformed rule record, collected during spec loading.
///
/// The store never fails on the first bad record: every offending record
/// is reported in one pass so rule authors can fix the whole file at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRecordError {
    /// Rule id as written in the record, or `<onbekend>` when missing.
    pub id: String,
    /// Name of the offending field.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl fmt::Display for SpecRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: veld '{}': {}", self.id, self.field, self.message)
    }
}

/// Errors in engine configuration or rule specification loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("{} malformed rule record(s): {}", .errors.len(), format_records(.errors))]
    MalformedSpecRecords { errors: Vec<SpecRecordError> },

    #[error(
        "Rule binding incomplete: {} spec(s) without implementation ({}), \
         {} implementation(s) without spec ({})",
        .specs_without_impl.len(),
        .specs_without_impl.join(", "),
        .impls_without_spec.len(),
        .impls_without_spec.join(", ")
    )]
    BindingMismatch {
        specs_without_impl: Vec<String>,
        impls_without_spec: Vec<String>,
    },
}

fn format_records(errors: &[SpecRecordError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ToetsErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::CONFIG_FILE_NOT_FOUND,
            Self::ParseError { .. } => error_code::CONFIG_PARSE,
            Self::ValidationFailed { .. } => error_code::CONFIG_VALIDATION,
            Self::MalformedSpecRecords { .. } => error_code::CONFIG_SPEC_RECORDS,
            Self::BindingMismatch { .. } => error_code::CONFIG_BINDING,
        }
    }
}
