//! Scaffolding configuration
//!
//! Configuration is stored in `forge.toml` at the project root. A missing
//! file yields the defaults, so nothing outside `forge new` ever has to
//! create it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default AWS region used when the project does not override it.
pub const DEFAULT_REGION: &str = "us-east-2";

const CONFIG_FILE: &str = "forge.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// AWS region substituted into the Terraform variables
    pub region: String,

    /// Directory holding the lambda packages
    pub package_directory: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            package_directory: "packages".to_string(),
        }
    }
}

impl ForgeConfig {
    /// Loads the configuration from `forge.toml` under `root`, falling back
    /// to the defaults when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse forge.toml")
    }

    /// Writes the configuration to `forge.toml` under `root`.
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_path = root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))
    }
}
