//! Pluggable text normalization.
//!
//! The orchestrator accepts an optional normalizer as a pre-processing
//! collaborator. When absent, raw text is validated unchanged. The
//! engine never owns text cleaning; richer implementations live with
//! the callers.

/// Normalizes candidate definition text before rule execution.
pub trait TextNormalizer: Send + Sync {
    /// Returns the normalized text. Must be deterministic: identical
    /// input yields identical output.
    fn normalize(&self, text: &str) -> String;

    /// Name used in tracing output.
    fn name(&self) -> &'static str {
        "normalizer"
    }
}

/// Passes text through unchanged.
pub struct NoopNormalizer;

impl TextNormalizer for NoopNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Collapses runs of whitespace to single spaces and trims the ends.
/// Line breaks inside pasted definitions are the common case.
pub struct WhitespaceNormalizer;

impl TextNormalizer for WhitespaceNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
