use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DocLinkError, Result};
use crate::plugins::TypePlugin;

/// Default name of the configuration file.
pub const CONFIG_FILENAME: &str = "doclink.json";

/// Configuration of a converter run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Registered plugin names to run, in order.
    pub plugins: Vec<String>,
    /// Whether JSON output is pretty-printed.
    pub pretty: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            plugins: vec![TypePlugin::NAME.to_string()],
            pretty: true,
        }
    }
}

/// Loads the configuration from disk.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config(config_path: &Path) -> Result<ConverterConfig> {
    if !config_path.exists() {
        return Ok(ConverterConfig::default());
    }

    let contents = fs::read_to_string(config_path).map_err(|e| DocLinkError::Config {
        message: format!(
            "cannot read converter config '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    serde_json::from_str(&contents).map_err(|e| DocLinkError::Config {
        message: format!(
            "converter config '{}' is not valid JSON: {}",
            config_path.display(),
            e
        ),
    })
}

/// Saves the configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final location.
pub fn save_config(config_path: &Path, config: &ConverterConfig) -> Result<()> {
    if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| DocLinkError::Config {
            message: format!("cannot create directory '{}' for converter config: {}", dir.display(), e),
        })?;
    }

    let tmp_path = config_path.with_extension("tmp");
    let json = serde_json::to_string_pretty(config).map_err(|e| DocLinkError::Config {
        message: format!("cannot encode converter config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| DocLinkError::Config {
        message: format!(
            "cannot stage converter config at '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, config_path).map_err(|e| DocLinkError::Config {
        message: format!(
            "cannot move staged converter config '{}' into place at '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}
