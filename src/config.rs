use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ExportError, Result};
use crate::file_writer::JsonStyle;

/// Application configuration structure
///
/// The defaults are the tool's fixed behaviour: read `sms.db`, write into
/// `threads/`. Files and environment variables only ever override them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the message store lives
    #[serde(default)]
    pub source: SourceConfig,
    /// Where and how threads are written
    #[serde(default)]
    pub export: ExportConfig,
    /// Log filtering and destinations
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the SQLite message store
    pub database_path: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `thread_<id>.json` files
    pub output_directory: String,
    /// Indent JSON output
    pub pretty: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Optional JSON log file
    pub file_path: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            database_path: "sms.db".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_directory: "threads".to_string(),
            pretty: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    ///
    /// Defaults, then `config/default.*`, then `config/local.*`, then
    /// `THREAD_EXPORT_<SECTION>__<KEY>` environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("source.database_path", defaults.source.database_path)
            .and_then(|b| {
                b.set_default("export.output_directory", defaults.export.output_directory)
            })
            .and_then(|b| b.set_default("export.pretty", defaults.export.pretty))
            .and_then(|b| b.set_default("logging.level", defaults.logging.level))
            .map_err(|e| ExportError::InvalidConfig(e.to_string()))?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("THREAD_EXPORT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| {
                ExportError::InvalidConfig(format!("Failed to load configuration: {e}"))
            })?;

        let app_config: Self = config.try_deserialize().map_err(|e| {
            ExportError::InvalidConfig(format!("Failed to deserialize configuration: {e}"))
        })?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source.database_path.trim().is_empty() {
            return Err(ExportError::InvalidConfig("database_path must not be empty".to_string()));
        }

        if self.export.output_directory.trim().is_empty() {
            return Err(ExportError::InvalidConfig(
                "output_directory must not be empty".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ExportError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    /// Path of the message store
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.source.database_path)
    }

    /// Output directory
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.export.output_directory)
    }

    /// JSON layout for thread files
    #[must_use]
    pub const fn json_style(&self) -> JsonStyle {
        if self.export.pretty {
            JsonStyle::Pretty
        } else {
            JsonStyle::Compact
        }
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}
