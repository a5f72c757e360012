//! Engine configuration loaded from `novella.toml`.
//!
//! Every section and field is optional; anything left out keeps its
//! default value.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{CONFIG_FILE, DATABASE_FILE, SAVE_FILE};
use crate::error::{Error, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub gpu: GpuConfig,
    pub storage: StorageConfig,
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Application".to_string(),
            width: 600,
            height: 500,
            resizable: false,
        }
    }
}

/// Vulkan settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    /// Application name reported to the driver.
    pub app_name: String,
    /// Enable validation layers (default: debug builds only).
    pub validation: bool,
    /// Order devices by category before picking the first presentable one.
    pub prefer_discrete: bool,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            app_name: "Application".to_string(),
            validation: cfg!(debug_assertions),
            prefer_discrete: false,
        }
    }
}

/// Locations of persisted data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub save_path: PathBuf,
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(SAVE_FILE),
            database_path: PathBuf::from(DATABASE_FILE),
        }
    }
}

impl EngineConfig {
    /// Load `novella.toml` from the working directory, falling back to
    /// defaults if it is missing or broken.
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE).unwrap_or_else(|e| {
            tracing::warn!("{e}. Using default configuration.");
            Self::default()
        })
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is
    /// an error.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { source, .. } => Error::Config {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        tracing::info!("Loaded configuration from {}", path.display());
        tracing::debug!("Config: {config:?}");

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| Error::Config {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::InvalidData(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }
}
