//! JSON exporter

use super::exporter::Exporter;
use crate::error::Result;
use crate::record::RecordSet;

/// JSON exporter, pretty printed
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for JsonExporter {
    fn export(&self, report: &RecordSet) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
