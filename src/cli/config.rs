//! Configuration file
//!
//! ```json
//! {
//!   "catalog_path": "catalog.json",
//!   "forced_index": "orders,idx_orders_gin",
//!   "log_level": "info"
//! }
//! ```
//!
//! A relative `catalog_path` is resolved against the config file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog description (required)
    pub catalog_path: String,

    /// Initial value of planfix.forced_index (optional, default "")
    #[serde(default)]
    pub forced_index: String,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.catalog_path.trim().is_empty() {
            return Err(CliError::config_error("catalog_path must not be empty"));
        }
        self.log_level()?;
        Ok(())
    }

    /// Parsed log level
    pub fn log_level(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }

    /// Catalog path, relative paths taken from the config file's directory
    pub fn catalog_path_from(&self, config_path: &Path) -> PathBuf {
        let catalog = Path::new(&self.catalog_path);
        if catalog.is_absolute() {
            return catalog.to_path_buf();
        }
        config_path
            .parent()
            .map(|dir| dir.join(catalog))
            .unwrap_or_else(|| catalog.to_path_buf())
    }
}
