//! Export CSV input

use br_core::error::{ReportError, Result};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

const BOM: char = '\u{feff}';

/// An export file on disk
#[derive(Debug, Clone)]
pub struct InputFile {
    path: PathBuf,
    strip_bom: bool,
}

impl InputFile {
    /// Open an export file; it is only read when [`InputFile::rows`] is called
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(ReportError::FileNotFound(path));
        }

        Ok(Self {
            path,
            strip_bom: true,
        })
    }

    /// Set whether a leading byte order mark is removed from the first cell
    pub fn with_strip_bom(mut self, strip: bool) -> Self {
        self.strip_bom = strip;
        self
    }

    /// Path of the export file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row, header included.
    ///
    /// Rows may have differing lengths; arity is checked by the record reader.
    pub fn rows(&self) -> Result<Vec<Vec<String>>> {
        let file = fs::File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReportError::FileNotFound(self.path.clone())
            } else {
                ReportError::Io(e)
            }
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ReportError::Csv(e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        if self.strip_bom {
            if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
                if let Some(rest) = first.strip_prefix(BOM) {
                    *first = rest.to_string();
                }
            }
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }
}
