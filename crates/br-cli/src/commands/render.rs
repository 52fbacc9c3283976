//! Render command
//!
//! Read an export file and write it as a report.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

use br_core::export::ExportManager;
use br_core::record::{DateRange, RecordReader};
use br_storage::{InputFile, ReportWriter};

use super::{load_config, parse_date_bound};

/// Report format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Standalone HTML with print page breaks
    Html,
    /// Markdown with page-break markers
    Markdown,
    /// Parsed records as JSON
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
        }
    }
}

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Export CSV file
    pub input: PathBuf,

    /// Output file; the format's extension is added when missing
    pub output: PathBuf,

    /// Keep records created on or after this date (YYYY/MM/DD)
    #[arg(long, value_parser = parse_date_bound)]
    pub from_date: Option<NaiveDate>,

    /// Keep records created on or before this date (YYYY/MM/DD)
    #[arg(long, value_parser = parse_date_bound)]
    pub to_date: Option<NaiveDate>,

    /// Report format [default: from configuration]
    #[arg(long, short, value_enum)]
    pub format: Option<ReportFormat>,

    /// Leave out the table of contents
    #[arg(long)]
    pub no_toc: bool,

    /// Report title
    #[arg(long)]
    pub title: Option<String>,
}

/// Execute the render command
pub fn execute(args: RenderArgs, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let range = DateRange::new(args.from_date, args.to_date)?;
    let mut config = load_config(config_path)?;

    // Flags override configuration
    if args.no_toc {
        config.export.include_toc = false;
    }
    if let Some(title) = args.title {
        config.export.title = title;
    }
    let format = args
        .format
        .map(|f| f.as_str().to_string())
        .unwrap_or_else(|| config.export.default_format.clone());

    let manager = ExportManager::from_config(&config.export);
    let output_path = manager.output_path(&format, &args.output)?;

    let input = InputFile::open(&args.input)?.with_strip_bom(config.input.strip_bom);
    let rows = input
        .rows()
        .map_err(|e| e.with_context(format!("Failed to read {}", input.path().display())))?;
    let report = RecordReader::new().with_range(range).read(rows)?;

    eprintln!(
        "Rendering {} {} record(s) ({} comments)...",
        report.len().to_string().yellow(),
        report.kind.to_string().cyan(),
        report.comment_count().to_string().yellow()
    );

    let content = manager.export(&report, &format)?;
    ReportWriter::write(&output_path, &content)
        .context(format!("Failed to write to {}", output_path.display()))?;

    eprintln!("{} Rendered to {}", "✓".green(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use br_core::types::BOARD_HEADER;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: PathBuf, output: PathBuf) -> RenderArgs {
        RenderArgs {
            input,
            output,
            from_date: None,
            to_date: None,
            format: None,
            no_toc: false,
            title: None,
        }
    }

    fn write_board_export(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("boards.csv");
        let content = format!(
            "{}\n1,Kickoff,Agenda,Sato,2024/01/10 09:00,Sato,2024/01/10 09:00,\n\
             2,Retro,Notes,Sato,2024/03/10 09:00,Sato,2024/03/10 09:00,\n",
            BOARD_HEADER.join(",")
        );
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_report_format_values() {
        assert!(ReportFormat::from_str("html", true).is_ok());
        assert!(ReportFormat::from_str("markdown", true).is_ok());
        assert!(ReportFormat::from_str("json", true).is_ok());
        assert!(ReportFormat::from_str("pdf", true).is_err());
    }

    #[test]
    fn test_render_with_config_and_flags() {
        let dir = TempDir::new().unwrap();
        let input = write_board_export(&dir);
        let config = dir.path().join("config.toml");
        fs::write(&config, "[export]\ndefault_format = \"markdown\"\n").unwrap();

        let mut render = args(input, dir.path().join("report"));
        render.from_date = NaiveDate::from_ymd_opt(2024, 2, 1);
        render.title = Some("Boards".to_string());
        execute(render, Some(&config)).unwrap();

        let content = fs::read_to_string(dir.path().join("report.md")).unwrap();
        assert!(content.starts_with("# Boards\n"));
        assert!(content.contains("Retro [2]"));
        assert!(!content.contains("Kickoff"));
    }

    #[test]
    fn test_inverted_range_fails_before_reading() {
        let dir = TempDir::new().unwrap();
        let mut render = args(dir.path().join("missing.csv"), dir.path().join("out"));
        render.from_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        render.to_date = NaiveDate::from_ymd_opt(2024, 1, 1);

        let err = execute(render, None).unwrap_err();
        assert!(err.to_string().contains("Invalid date bound"));
    }
}
