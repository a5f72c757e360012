//! Core types and configuration for Novella.
//!
//! This crate provides what every other Novella crate shares:
//! - The engine configuration loaded from `novella.toml`
//! - Common error types

pub mod config;
pub mod error;

pub use config::{EngineConfig, GpuConfig, StorageConfig, WindowConfig};
pub use error::{Error, Result};

/// Default file locations.
pub mod constants {
    /// Configuration file read by [`crate::EngineConfig::load`].
    pub const CONFIG_FILE: &str = "novella.toml";
    /// Save document written and read by the save tool.
    pub const SAVE_FILE: &str = "save.data";
    /// SQLite database holding the `scenes` table.
    pub const DATABASE_FILE: &str = "save_data.sqlite3";
}
