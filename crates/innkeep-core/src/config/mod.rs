//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so an empty file is a
//! valid configuration.

pub mod calendar;
pub mod checklist;
pub mod inventory;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::calendar::CalendarConfig;
use self::checklist::ChecklistConfig;
use self::inventory::InventoryConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Weekly calendar settings.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Check-in checklist template.
    #[serde(default)]
    pub checklist: ChecklistConfig,
    /// Inventory alerting settings.
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Data snapshot location.
    #[serde(default)]
    pub data: DataConfig,
}

/// Where the JSON data snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the snapshot file read on startup and written after changes.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files under `config/`.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `INNKEEP__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Same as [`AppConfig::load`] with an explicit configuration directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("INNKEEP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse a configuration from an in-memory TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}

fn default_snapshot_path() -> String {
    "data/innkeep.json".to_string()
}
