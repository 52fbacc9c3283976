//! Report output

use br_core::error::{ReportError, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes rendered reports to disk
pub struct ReportWriter;

impl ReportWriter {
    /// Write `content` to `path` atomically (write to temp, then rename)
    pub fn write(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ReportError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to create output directory: {}", e),
                    ))
                })?;
                debug!("Created output directory: {:?}", parent);
            }
        }

        let temp_path = Self::temp_path(path);
        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            ReportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        if let Err(e) = writer.write_all(content.as_bytes()).and_then(|_| writer.flush()) {
            drop(writer);
            let _ = fs::remove_file(&temp_path);
            return Err(ReportError::Io(e));
        }
        drop(writer);

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ReportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Wrote {} bytes to {:?}", content.len(), path);
        Ok(())
    }

    /// Hidden temp sibling of `path`
    fn temp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        path.with_file_name(format!(".{}.tmp", name))
    }
}
