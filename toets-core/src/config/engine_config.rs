//! Top-level engine configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BindingConfig, BindingMode, ExecutionConfig, ScoringConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Caller overrides (applied via `apply_overrides`)
/// 2. Environment variables (`TOETS_*`)
/// 3. Project config (`toets.toml` in project root)
/// 4. User config (`~/.toets/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub execution: ExecutionConfig,
    pub binding: BindingConfig,
}

/// Caller override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct EngineOverrides {
    pub threshold: Option<f64>,
    pub profile: Option<String>,
    pub binding_mode: Option<BindingMode>,
    pub item_timeout_ms: Option<u64>,
}

impl EngineConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, overrides: Option<&EngineOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(_) => {
                        // Non-parse errors from user config are warnings, not fatal.
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("toets.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): caller overrides
        if let Some(ov) = overrides {
            Self::apply_overrides(&mut config, ov);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the resolved configuration values.
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.scoring.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(ref profile) = config.scoring.profile {
            if profile != super::scoring_config::PROFILE_STANDAARD
                && profile != super::scoring_config::PROFILE_STRENG
            {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.profile".to_string(),
                    message: format!("unknown profile '{profile}'"),
                });
            }
        }
        if let Some(timeout) = config.execution.item_timeout_ms {
            if timeout == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "execution.item_timeout_ms".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(threads) = config.execution.batch_threads {
            if threads == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "execution.batch_threads".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.toets/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".toets").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut EngineConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` value.
    fn merge(base: &mut EngineConfig, other: &EngineConfig) {
        if other.scoring.threshold.is_some() {
            base.scoring.threshold = other.scoring.threshold;
        }
        if other.scoring.profile.is_some() {
            base.scoring.profile = other.scoring.profile.clone();
        }

        if other.execution.parallel_rules.is_some() {
            base.execution.parallel_rules = other.execution.parallel_rules;
        }
        if other.execution.batch_threads.is_some() {
            base.execution.batch_threads = other.execution.batch_threads;
        }
        if other.execution.item_timeout_ms.is_some() {
            base.execution.item_timeout_ms = other.execution.item_timeout_ms;
        }

        if other.binding.mode.is_some() {
            base.binding.mode = other.binding.mode;
        }
        if other.binding.regels_pad.is_some() {
            base.binding.regels_pad = other.binding.regels_pad.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TOETS_SCORING_THRESHOLD`, `TOETS_BINDING_MODE`, etc.
    fn apply_env_overrides(config: &mut EngineConfig) {
        if let Ok(val) = std::env::var("TOETS_SCORING_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.scoring.threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOETS_SCORING_PROFILE") {
            config.scoring.profile = Some(val);
        }
        if let Ok(val) = std::env::var("TOETS_EXECUTION_PARALLEL_RULES") {
            if let Ok(v) = val.parse::<bool>() {
                config.execution.parallel_rules = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOETS_EXECUTION_ITEM_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.execution.item_timeout_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOETS_BINDING_MODE") {
            if let Some(mode) = BindingMode::parse(&val) {
                config.binding.mode = Some(mode);
            }
        }
        if let Ok(val) = std::env::var("TOETS_BINDING_REGELS_PAD") {
            config.binding.regels_pad = Some(val);
        }
    }

    /// Apply caller overrides (highest priority).
    fn apply_overrides(config: &mut EngineConfig, ov: &EngineOverrides) {
        if let Some(v) = ov.threshold {
            config.scoring.threshold = Some(v);
        }
        if let Some(ref v) = ov.profile {
            config.scoring.profile = Some(v.clone());
        }
        if let Some(v) = ov.binding_mode {
            config.binding.mode = Some(v);
        }
        if let Some(v) = ov.item_timeout_ms {
            config.execution.item_timeout_ms = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
