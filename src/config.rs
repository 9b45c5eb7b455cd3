//! Configuration for the tracer
//!
//! The only setting is the threshold. It can be written as a level name
//! (`threshold = "warning"`) or as its number (`threshold = 3`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tracer::Severity;

/// Tracer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracerConfig {
    /// Minimum severity an entry needs to be recorded (default: debug)
    #[serde(default = "default_threshold")]
    pub threshold: Severity,
}

fn default_threshold() -> Severity {
    Severity::Debug
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl TracerConfig {
    /// Load configuration from the default path, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        tracing::debug!("Loaded config from {}: threshold={}", path.display(), config.threshold);
        Ok(config)
    }

    /// Save configuration to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// File name looked up inside the platform config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// `<platform config dir>/tracer/config.toml`, e.g. `~/.config/tracer/config.toml`
///
/// Without a known config directory the file is looked up relative to the
/// working directory.
pub fn config_file_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        tracing::warn!("No platform config directory, looking for tracer config in cwd");
        PathBuf::from(".")
    });
    base.join("tracer").join(CONFIG_FILE_NAME)
}
