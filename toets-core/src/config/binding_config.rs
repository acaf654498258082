//! Rule binding configuration: strict/lenient mode and corpus location.

use serde::{Deserialize, Serialize};

/// How spec↔implementation mismatches are handled at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BindingMode {
    /// Any mismatch is load-time fatal. The engine refuses to serve a
    /// partial rule set silently.
    #[default]
    Strikt,
    /// Mismatches are logged and unmatched rules excluded. Used during
    /// staged rollout of new rules.
    Soepel,
}

impl BindingMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strikt" => Some(Self::Strikt),
            "soepel" => Some(Self::Soepel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BindingConfig {
    pub mode: Option<BindingMode>,
    /// Path to a rule corpus TOML overriding the embedded one.
    pub regels_pad: Option<String>,
}

impl BindingConfig {
    pub fn resolved_mode(&self) -> BindingMode {
        self.mode.unwrap_or_default()
    }
}
