//! Configuration loading and management
//!
//! Handles parsing of `tasktube.toml` configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Task API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend serving `/api/tasks`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist and parse. Without one, the
    /// per-user config file is read if present, otherwise defaults
    /// apply.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::InvalidConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::parse_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::parse_file(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    /// Per-user config location (`~/.config/tasktube/tasktube.toml` on
    /// Linux).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tasktube")
            .map(|dirs| dirs.config_dir().join("tasktube.toml"))
    }

    // A config file the user pointed at (or left behind) that cannot
    // be read or parsed is a user error, not an operation failure.
    fn parse_file(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path).map_err(|err| {
            Error::InvalidConfig(format!("failed to read {}: {err}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|err| {
            Error::InvalidConfig(format!("failed to parse {}: {err}", path.display()))
        })
    }
}
