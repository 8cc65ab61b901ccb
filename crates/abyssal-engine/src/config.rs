//! Engine configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! max_delay_seconds = 2.0
//! whispers_delay_ms = 500.0
//! reverb_damping = 0.5
//! reverb_width = 1.0
//! meter_release_ms = 300.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Static settings fixed for the life of an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Length of the whispers delay buffer in seconds.
    pub max_delay_seconds: f32,
    /// Whispers echo time in milliseconds. Must fit inside the buffer.
    pub whispers_delay_ms: f32,
    /// Damping of the VOID reverb, `[0, 1]`.
    pub reverb_damping: f32,
    /// Stereo width of the VOID reverb, `[0, 1]`.
    pub reverb_width: f32,
    /// Release time of the output level meter in milliseconds.
    pub meter_release_ms: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_delay_seconds: 2.0,
            whispers_delay_ms: 500.0,
            reverb_damping: 0.5,
            reverb_width: 1.0,
            meter_release_ms: 300.0,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| EngineError::read_config(path, e))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Whispers echo time in seconds.
    pub fn whispers_delay_seconds(&self) -> f32 {
        self.whispers_delay_ms / 1000.0
    }

    /// Check ranges and cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_delay_seconds", self.max_delay_seconds),
            ("whispers_delay_ms", self.whispers_delay_ms),
            ("meter_release_ms", self.meter_release_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::invalid_config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let unit = [
            ("reverb_damping", self.reverb_damping),
            ("reverb_width", self.reverb_width),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::invalid_config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }

        if self.whispers_delay_seconds() >= self.max_delay_seconds {
            return Err(EngineError::invalid_config(format!(
                "whispers_delay_ms ({} ms) must be shorter than max_delay_seconds ({} s)",
                self.whispers_delay_ms, self.max_delay_seconds
            )));
        }
        Ok(())
    }
}
