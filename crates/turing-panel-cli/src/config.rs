//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Serial port path or "auto" for discovery by serial number
    #[serde(default = "default_device")]
    pub device: String,

    /// Panel hardware revision (A-D)
    #[serde(default = "default_revision")]
    pub revision: String,

    /// USB serial number matched when `device` is "auto"
    #[serde(default = "default_serial_number")]
    pub serial_number: String,

    /// Brightness (0-100) applied after the panel is opened
    #[serde(default)]
    pub brightness: Option<i32>,

    /// Orientation applied after the panel is opened
    #[serde(default)]
    pub orientation: Option<String>,
}

// Default value functions
fn default_device() -> String {
    "auto".to_string()
}

fn default_revision() -> String {
    "A".to_string()
}

fn default_serial_number() -> String {
    "USB35INCHIPSV2".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: default_device(),
            revision: default_revision(),
            serial_number: default_serial_number(),
            brightness: None,
            orientation: None,
        }
    }
}
