//! Config persistence and path resolution for `PreviewConfig`.
//!
//! Covers:
//! - `load` / `save` against the default XDG location
//! - `load_from` / `save_to` for explicit paths (atomic write)
//! - `config_path` / `config_dir`

use super::PreviewConfig;
use crate::error::ConfigError;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

impl PreviewConfig {
    /// Load configuration from the default path, or defaults if the file is absent.
    ///
    /// Unlike the save path, a missing file is not written back: the pipeline
    /// runs fine on defaults and a read-only CLI should not create files.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit YAML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: PreviewConfig =
            serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {e}");
            return Err(e.into());
        }
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;
        log::info!("Config saved to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path: `gist-preview` under the
    /// platform config directory (`$XDG_CONFIG_HOME` or `~/.config` on Linux,
    /// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows).
    /// Falls back to the working directory when no home is known.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("gist-preview"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
