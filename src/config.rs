use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eraser::EraserConfig;

/// Errors that can occur while loading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunables of an [`InkEngine`](crate::InkEngine).
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub eraser: EraserConfig,
    /// Maximum number of undo steps kept, 0 for unbounded
    pub max_history: usize,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let eraser = &self.eraser;
        if !eraser.min_radius.is_finite() || eraser.min_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "eraser.min_radius must be a non-negative number, got {}",
                eraser.min_radius
            )));
        }
        if !eraser.width_factor.is_finite() || eraser.width_factor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "eraser.width_factor must be positive, got {}",
                eraser.width_factor
            )));
        }
        Ok(())
    }
}
