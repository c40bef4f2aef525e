//! Driver configuration persistence
//!
//! Loads [`DriverConfig`] from a JSON file. The file is optional: a missing or unreadable file
//! falls back to defaults, so the driver always starts.
//!
//! # File Location
//!
//! An explicit `--config <path>` wins. Otherwise `sightline.json` in the platform config
//! directory is used, or the current directory when the platform has none.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Config filename
const CONFIG_FILENAME: &str = "sightline.json";

/// Settings for the headless driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Minimax depth used when `play` is not given `--depth`
    pub search_depth: u8,
    /// Speed test prints a line every this many games
    pub report_interval: u32,
    /// Log search progress events while playing
    pub show_progress: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            search_depth: 3,
            report_interval: 100,
            show_progress: false,
        }
    }
}

/// Path of the config file in the user's configuration directory
pub fn default_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "sightline", "Sightline") {
        proj_dirs.config_dir().join(CONFIG_FILENAME)
    } else {
        PathBuf::from(CONFIG_FILENAME)
    }
}

impl DriverConfig {
    /// Loads from `path`, or from [`default_config_path`] when `None`
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&default_config_path()),
        }
    }

    /// Loads from `path`, using defaults if the file is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("[CONFIG] No config file at {:?}. Using defaults.", path);
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<DriverConfig>(&contents) {
                Ok(config) => {
                    info!("[CONFIG] Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "[CONFIG] Failed to parse config file at {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "[CONFIG] Failed to read config file at {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Saves to `path`, or to [`default_config_path`] when `None`, and returns where it went
    pub fn store(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = path.map_or_else(default_config_path, Path::to_path_buf);
        self.save(&path)?;
        Ok(path)
    }

    /// Writes the config as pretty JSON, creating the directory if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(self).context("serializing config")?;
        fs::write(path, json).with_context(|| format!("writing config file {:?}", path))?;
        info!("[CONFIG] Saved config to {:?}", path);
        Ok(())
    }
}
