use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::DEFAULT_NA_VALUES;

pub const APP_NAME: &str = "tabsift";

/// Environment variable that overrides `base_dir`.
pub const BASE_DIR_ENV: &str = "TABSIFT_BASE_DIR";

/// What to do when the skip-rows input is not a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipRowsFallback {
    /// Silently use this many rows instead.
    UseDefault(usize),
}

impl Default for SkipRowsFallback {
    fn default() -> Self {
        SkipRowsFallback::UseDefault(0)
    }
}

/// User configuration, read from `<config_dir>/tabsift/config.toml`.
///
/// ```toml
/// base_dir = "/home/me/Desktop"
/// require_nonempty_query = false
/// on_invalid_skip_rows = { use_default = 0 }
/// csv_na_values = ["", "NA", "N/A"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the open/save dialogs start in.
    pub base_dir: Option<PathBuf>,
    /// Reject an empty filter query instead of matching every row.
    pub require_nonempty_query: bool,
    pub on_invalid_skip_rows: SkipRowsFallback,
    /// CSV cells treated as missing values.
    pub csv_na_values: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            require_nonempty_query: false,
            on_invalid_skip_rows: SkipRowsFallback::default(),
            csv_na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all layers (default → user file → environment).
    ///
    /// A missing file means defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => AppConfig::default(),
        };
        if let Some(dir) = std::env::var_os(BASE_DIR_ENV) {
            config.base_dir = Some(PathBuf::from(dir));
        }
        Ok(config)
    }

    /// Path of the user config file, if the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Starting directory for file dialogs: configured, else desktop, else home.
    pub fn start_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .or_else(dirs::desktop_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Interpret the skip-rows text input, applying the fallback policy.
    pub fn parse_skip_rows(&self, input: &str) -> usize {
        match input.trim().parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                let SkipRowsFallback::UseDefault(n) = self.on_invalid_skip_rows;
                log::warn!("Skip rows input '{input}' is not a valid count; using {n}");
                n
            }
        }
    }
}
