//! Application Configuration
//!
//! Optional `quick-switch.toml`. Every field has a default, so a missing
//! or partial file is fine; a malformed one is reported and ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::Rgb;

/// File name searched for in the standard locations
pub const CONFIG_FILE_NAME: &str = "quick-switch.toml";

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub overlay: OverlayConfig,
    pub logging: LoggingConfig,
}

/// Confirmation overlay appearance and lifetime
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub font_family: String,
    /// Font cell height in pixels
    pub font_size: i32,
    /// Space between text and border
    pub padding: i32,
    /// Distance from the top-left corner of the screen
    pub offset: i32,
    /// How long an overlay stays up
    pub lifetime_ms: u64,
    /// Layered-window alpha, 255 = opaque
    pub opacity: u8,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_family: "Segoe UI".to_string(),
            font_size: 42,
            padding: 10,
            offset: 10,
            lifetime_ms: 3000,
            opacity: 240,
            background: Rgb::CHARCOAL,
            foreground: Rgb::WHITE,
        }
    }
}

/// Log output settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where the active configuration came from
#[derive(Debug)]
pub enum ConfigOrigin {
    /// No file found
    Defaults,
    /// Loaded from this file
    File(PathBuf),
    /// A file was found but could not be used; defaults are active
    Invalid(PathBuf, ConfigError),
}

impl Config {
    /// Find the config file in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: %APPDATA%/quick-switch, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("quick-switch").join(CONFIG_FILE_NAME)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME))),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load from the first file found, falling back to defaults
    pub fn load() -> (Self, ConfigOrigin) {
        match Self::find_config_path() {
            Some(path) => match Self::load_from_path(&path) {
                Ok(config) => (config, ConfigOrigin::File(path)),
                Err(e) => (Self::default(), ConfigOrigin::Invalid(path, e)),
            },
            None => (Self::default(), ConfigOrigin::Defaults),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let overlay = &self.overlay;
        if overlay.font_family.trim().is_empty() {
            return Err(ConfigError::Invalid("overlay.font_family is empty".into()));
        }
        if overlay.font_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "overlay.font_size must be positive, got {}",
                overlay.font_size
            )));
        }
        if overlay.padding < 0 || overlay.offset < 0 {
            return Err(ConfigError::Invalid(
                "overlay.padding and overlay.offset must not be negative".into(),
            ));
        }
        if overlay.lifetime_ms == 0 {
            return Err(ConfigError::Invalid("overlay.lifetime_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value: {0}")]
    Invalid(String),
}
