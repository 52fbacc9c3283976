//! Inspect command
//!
//! Parse an export file and summarize its records.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};

use br_core::record::{DateRange, RecordReader, RecordSet};
use br_storage::InputFile;

use super::{load_config, parse_date_bound};

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Export CSV file
    pub input: PathBuf,

    /// Keep records created on or after this date (YYYY/MM/DD)
    #[arg(long, value_parser = parse_date_bound)]
    pub from_date: Option<NaiveDate>,

    /// Keep records created on or before this date (YYYY/MM/DD)
    #[arg(long, value_parser = parse_date_bound)]
    pub to_date: Option<NaiveDate>,

    /// Print the parsed records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs, config_path: Option<&Path>) -> Result<()> {
    let range = DateRange::new(args.from_date, args.to_date)?;
    let config = load_config(config_path)?;

    let rows = InputFile::open(&args.input)?
        .with_strip_bom(config.input.strip_bom)
        .rows()?;
    let report = RecordReader::new().with_range(range).read(rows)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", summary(&report));
    }
    Ok(())
}

/// Human readable summary: kind, counts, then one line per record
fn summary(report: &RecordSet) -> String {
    use colored::Colorize;

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Kind:".bold(), report.kind.to_string().cyan()));
    out.push_str(&format!("{} {}\n", "Records:".bold(), report.len()));
    if report.kind.has_comments() {
        out.push_str(&format!("{} {}\n", "Comments:".bold(), report.comment_count()));
    }

    if !report.is_empty() {
        out.push('\n');
    }
    for record in &report.records {
        let created = record
            .create_time()
            .map(|t| format!("  {}", t.to_string().dimmed()))
            .unwrap_or_default();
        let comments = if report.kind.has_comments() {
            format!("  ({} comments)", record.comments().len())
        } else {
            String::new()
        };
        out.push_str(&format!("  {}{}{}\n", record.title(), created, comments));
    }
    out
}
