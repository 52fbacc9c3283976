//! Error types for board-report

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for board-report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Malformed metadata line directly under a comment separator
    #[error("Invalid comment header at line {line} ({reason}): {text}")]
    Parse {
        line: usize,
        text: String,
        reason: String,
    },

    /// Header row matches none of the known export layouts
    #[error("Unsupported CSV format, header not recognized: [{}]", header.join(", "))]
    UnsupportedFormat { header: Vec<String> },

    /// Row has the wrong number of columns for its record kind
    #[error("Row {row} has {found} columns, expected {expected}")]
    RecordShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Date filter bound could not be parsed or is inconsistent
    #[error("Invalid date bound: {0}")]
    InvalidDateBound(String),

    /// A typed cell could not be parsed
    #[error("Row {row}: invalid value for '{column}': {value:?}")]
    InvalidField {
        row: usize,
        column: String,
        value: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReportError>,
    },
}

impl ReportError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for board-report
pub type Result<T> = std::result::Result<T, ReportError>;
