//! Store configuration
//!
//! A `config.toml` lives inside the marker directory. It is written with
//! defaults at `init` time; a store without one (or with missing keys)
//! falls back to the defaults, so old stores keep working.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file inside the marker directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store format version.
    pub version: u32,
    pub diff: DiffConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Context lines emitted around each hunk.
    pub context_lines: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: 1,
            diff: DiffConfig::default(),
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self { context_lines: 3 }
    }
}

impl StoreConfig {
    /// Load the configuration file, falling back to defaults when absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| Error::Config(err.to_string()))
    }
}
