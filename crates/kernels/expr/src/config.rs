//! Engine configuration.
//!
//! Loaded from YAML:
//!
//! ```yaml
//! tolerance: 1.0e-7
//! angleUnit: degrees
//! unwind: shortest
//! slerp: shortest
//! naming:
//!   separator: "_"
//!   padding: 0
//! ```
//!
//! Every field is optional and falls back to [`EngineConfig::default`].

use std::path::Path;

use rigmath_foundation::{AngleUnit, DEFAULT_TOLERANCE, UnwindMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse the configuration YAML.
    #[error("failed to parse config YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A field holds a value outside its valid range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it is invalid.
        reason: String,
    },
}

/// Node naming settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingConfig {
    /// Joins name segments.
    pub separator: String,
    /// Minimum digits of the per-type counter.
    pub padding: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            padding: 0,
        }
    }
}

/// Settings shared by every operation of a builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Degeneracy threshold for cross products and transport angles.
    pub tolerance: f64,
    /// Unit of angle literals.
    pub angle_unit: AngleUnit,
    /// Default unwinding for angle-aware vector blends.
    pub unwind: UnwindMode,
    /// Default style for quaternion blends.
    pub slerp: UnwindMode,
    /// Node naming.
    pub naming: NamingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            angle_unit: AngleUnit::Radians,
            unwind: UnwindMode::Shortest,
            slerp: UnwindMode::Shortest,
            naming: NamingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "tolerance",
                reason: format!("must be a positive finite number, got {}", self.tolerance),
            });
        }
        if self.naming.separator.is_empty() {
            return Err(ConfigError::Invalid {
                field: "naming.separator",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
