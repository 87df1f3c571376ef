//! User-level configuration for rivera
//!
//! Supports loading config from:
//! - `$RIVERA_CONFIG`, if set
//! - ~/.config/rivera/config.toml

use super::palette::DEFAULT_BRANCH_COLORS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_HASH_LENGTH: usize = 8;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Comma separated lane colors (hex, 0-255, or color names)
    pub branch_colors: Option<String>,

    /// Characters of the commit hash to show
    pub hash_length: Option<usize>,

    /// chrono format string for the author date
    pub date_format: Option<String>,

    /// Show every branch and tag, not just HEAD
    pub all: Option<bool>,
}

impl UserConfig {
    /// Load the user config file, if there is one.
    ///
    /// A file that cannot be read or parsed is reported and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::user_config_path().filter(|p| p.exists()) else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => {
                debug!("Loaded user config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("RIVERA_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|p| p.join("rivera").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: UserConfig) {
        if other.display.branch_colors.is_some() {
            self.display.branch_colors = other.display.branch_colors;
        }
        if other.display.hash_length.is_some() {
            self.display.hash_length = other.display.hash_length;
        }
        if other.display.date_format.is_some() {
            self.display.date_format = other.display.date_format;
        }
        if other.display.all.is_some() {
            self.display.all = other.display.all;
        }
    }

    pub fn branch_colors(&self) -> &str {
        self.display
            .branch_colors
            .as_deref()
            .unwrap_or(DEFAULT_BRANCH_COLORS)
    }

    pub fn hash_length(&self) -> usize {
        self.display.hash_length.unwrap_or(DEFAULT_HASH_LENGTH)
    }

    pub fn date_format(&self) -> &str {
        self.display
            .date_format
            .as_deref()
            .unwrap_or(DEFAULT_DATE_FORMAT)
    }

    pub fn all(&self) -> bool {
        self.display.all.unwrap_or(false)
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, example_config())?;
        }

        Ok(config_path)
    }
}

/// Commented-out example written by `rivera config init`.
fn example_config() -> String {
    format!(
        r##"# rivera user configuration

[display]
# Lane colors: "#rrggbb", 0-255, or names like "red" (at least two)
# branch_colors = "{DEFAULT_BRANCH_COLORS}"

# hash_length = {DEFAULT_HASH_LENGTH}
# date_format = "{DEFAULT_DATE_FORMAT}"

# Walk every branch, remote branch and tag instead of HEAD only
# all = false
"##
    )
}
