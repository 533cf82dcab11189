use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Configuration for the validation pipelines.
///
/// Every key is optional in a TOML file; missing keys take their defaults.
///
/// ```toml
/// max_data_points = 10000000
/// max_data_nodes = 10000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Maximum number of values (rows times first-row width, summed over all
    /// data blocks) a single request may carry.
    pub max_data_points: usize,
    /// Maximum number of rows, summed over all data blocks, a single request
    /// may carry.
    pub max_data_nodes: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_data_points: 10_000_000,
            max_data_nodes: 10_000,
        }
    }
}

impl GateConfig {
    /// Reject limits that would refuse every request carrying data.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.max_data_points == 0 {
            return Err(GateError::Config("max_data_points must be positive".into()));
        }
        if self.max_data_nodes == 0 {
            return Err(GateError::Config("max_data_nodes must be positive".into()));
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, GateError> {
        let config: Self = toml::from_str(text).map_err(|e| GateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_toml_file(path: &Path) -> Result<Self, GateError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GateError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
