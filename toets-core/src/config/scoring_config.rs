//! Scoring configuration: acceptance threshold and profile.

use serde::{Deserialize, Serialize};

/// Named scoring profiles with their compiled defaults.
pub const PROFILE_STANDAARD: &str = "standaard";
pub const PROFILE_STRENG: &str = "streng";

/// Scoring knobs. Unset values resolve from the profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum overall score for acceptance, in `[0, 1]`.
    pub threshold: Option<f64>,
    /// Profile name: `standaard` (default) or `streng`.
    pub profile: Option<String>,
}

impl ScoringConfig {
    /// Profile name after defaulting.
    pub fn resolved_profile(&self) -> &str {
        self.profile.as_deref().unwrap_or(PROFILE_STANDAARD)
    }

    /// Threshold after profile defaulting: an explicit threshold wins,
    /// otherwise `standaard` gives 0.80 and `streng` gives 0.90.
    pub fn resolved_threshold(&self) -> f64 {
        if let Some(t) = self.threshold {
            return t;
        }
        match self.resolved_profile() {
            PROFILE_STRENG => 0.90,
            _ => 0.80,
        }
    }
}
