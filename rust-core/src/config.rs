//! Shake filter tuning.
//!
//! Defaults reproduce the reference behavior: 17 m/s² threshold, one
//! second debounce, 9.8 m/s² subtracted from each axis. Any field may be
//! overridden from a TOML file:
//!
//! ```toml
//! threshold = 15.0
//! debounce_ms = 750
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Earth gravity as subtracted by the filter (m/s²).
pub const GRAVITY_EARTH: f32 = 9.8;

/// Minimum net force that counts as a shake (m/s²).
pub const DEFAULT_THRESHOLD: f32 = 17.0;

/// Minimum spacing between accepted shakes (ms).
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Configuration for the shake filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShakeConfig {
    /// Net force at or above which a sample is a shake candidate (m/s²).
    pub threshold: f32,
    /// A candidate is accepted only if strictly more than this many
    /// milliseconds have passed since the last accepted shake.
    pub debounce_ms: u64,
    /// Scalar removed from each axis before computing net force (m/s²).
    pub gravity: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            gravity: GRAVITY_EARTH,
        }
    }
}

impl ShakeConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ShakeConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values can drive a meaningful filter.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "threshold",
                reason: format!("must be a finite positive number, got {}", self.threshold),
            });
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "gravity",
                reason: format!("must be finite, got {}", self.gravity),
            });
        }
        Ok(())
    }
}
