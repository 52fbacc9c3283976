//! Configuration management for board-report

use crate::error::{ReportError, Result};
use crate::export::ExportManager;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default project-local configuration file
pub const DEFAULT_CONFIG_PATH: &str = ".board-report/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// Input settings
    pub input: InputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ReportError::Toml(e.to_string()))?;
        config.validate()?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Default configuration path
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let format = self.export.default_format.as_str();
        if format.trim().is_empty() {
            return Err(ReportError::Config(
                "export.default_format must not be empty".to_string(),
            ));
        }

        let manager = ExportManager::from_config(&self.export);
        if !manager.has_format(format) {
            return Err(ReportError::Config(format!(
                "export.default_format '{}' is not one of: {}",
                format,
                manager.available_formats().join(", ")
            )));
        }
        Ok(())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ReportError::Toml(e.to_string()))
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Add a table of contents for kinds that support one
    pub include_toc: bool,
    /// Document title
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "html".to_string(),
            include_toc: true,
            title: "Export Report".to_string(),
        }
    }
}

/// Input-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Strip a UTF-8 byte order mark from the first cell
    pub strip_bom: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { strip_bom: true }
    }
}
