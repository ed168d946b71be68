//! Application configuration management.
//!
//! Configuration is stored at `~/.config/keygate/config.json`. Every field
//! is optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Application name used for the config directory path
const APP_NAME: &str = "keygate";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Passcode prompts per challenge unless configured otherwise
const DEFAULT_PASSCODE_TRIES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account used when `--account` is not given
    pub default_account: Option<String>,
    /// Passcode prompts before a challenge is denied
    pub passcode_tries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_account: None,
            passcode_tries: DEFAULT_PASSCODE_TRIES,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
