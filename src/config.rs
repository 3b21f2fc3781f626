//! Configuration for the `hora` binary.
//!
//! Loaded from YAML; every field has a default so a partial (or absent) file
//! is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hora_engagement::TrackerConfig;
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoraConfig {
    pub tracker: TrackerConfig,
    /// Debug logging, with every replayed hit mirrored to the log.
    pub debug: bool,
    pub log_level: String,
}

impl Default for HoraConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            debug: false,
            log_level: "info".into(),
        }
    }
}

pub struct LoadedConfig {
    pub config: HoraConfig,
    pub path: PathBuf,
    /// False when defaults were used because no file was found.
    pub from_file: bool,
}

/// `<config_dir>/hora/config.yaml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("hora");
    path.push("config.yaml");
    Some(path)
}

pub fn parse_config(raw: &str) -> Result<HoraConfig> {
    serde_yaml::from_str(raw).context("Failed to parse config file")
}

/// An explicit path must exist; a missing default file falls back to defaults.
/// Runs before logging is installed, so the caller reports the outcome.
pub async fn load_config(config_path: Option<&Path>) -> Result<LoadedConfig> {
    let (path, explicit) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => {
                return Ok(LoadedConfig {
                    config: HoraConfig::default(),
                    path: PathBuf::new(),
                    from_file: false,
                });
            }
        },
    };

    if explicit || path.exists() {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = parse_config(&content)?;
        Ok(LoadedConfig {
            config,
            path,
            from_file: true,
        })
    } else {
        Ok(LoadedConfig {
            config: HoraConfig::default(),
            path,
            from_file: false,
        })
    }
}
