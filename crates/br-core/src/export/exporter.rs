//! Exporter trait and manager

use crate::config::ExportConfig;
use crate::error::{ReportError, Result};
use crate::record::RecordSet;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Trait for report renderers
pub trait Exporter: Send + Sync {
    /// Render a record set to a document
    fn export(&self, report: &RecordSet) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        Self::from_config(&ExportConfig::default())
    }

    /// Create a manager whose exporters follow the export configuration
    pub fn from_config(config: &ExportConfig) -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(
            super::html::HtmlExporter::new()
                .with_title(&config.title)
                .with_toc(config.include_toc),
        ));
        manager.register(Box::new(
            super::markdown::MarkdownExporter::new()
                .with_title(&config.title)
                .with_toc(config.include_toc),
        ));
        manager.register(Box::new(super::json::JsonExporter::new()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Export a record set to the specified format
    pub fn export(&self, report: &RecordSet, format: &str) -> Result<String> {
        self.exporter(format)?.export(report)
    }

    /// Output path for `format`: the exporter's extension is appended when
    /// `path` has none.
    pub fn output_path(&self, format: &str, path: &Path) -> Result<PathBuf> {
        let exporter = self.exporter(format)?;
        if path.extension().is_some() {
            Ok(path.to_path_buf())
        } else {
            Ok(path.with_extension(exporter.file_extension()))
        }
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.exporters.contains_key(format)
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }

    fn exporter(&self, format: &str) -> Result<&dyn Exporter> {
        self.get(format).ok_or_else(|| {
            ReportError::Validation(format!(
                "Unknown export format: {} (available: {})",
                format,
                self.available_formats().join(", ")
            ))
        })
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}
