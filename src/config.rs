//! Configuration management for the application.
//!
//! This module handles loading and saving application configuration in
//! TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::RgbColor;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display the help overlay on startup
    pub show_help_on_startup: bool,
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Fill color assigned to newly created elements
    #[serde(default)]
    pub default_marker_color: RgbColor,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: true,
            theme_mode: ThemeMode::default(),
            default_marker_color: RgbColor::default(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LazySeq/config.toml`
/// - macOS: `~/Library/Application Support/LazySeq/config.toml`
/// - Windows: `%APPDATA%\LazySeq\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI preferences
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("LazySeq");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        Self::load_from_path(&config_path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to the default config file using atomic write.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        self.save_to_path(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using atomic write.
    ///
    /// Uses the temp file + rename pattern so a crash mid-write cannot
    /// leave a truncated config behind.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to move config file into place: {}",
            path.display()
        ))?;

        Ok(())
    }
}
