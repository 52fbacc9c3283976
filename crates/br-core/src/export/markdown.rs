//! Markdown exporter

use super::exporter::Exporter;
use super::outline::Outline;
use crate::comment::Comment;
use crate::error::Result;
use crate::record::{Record, RecordSet};

/// Page break understood by Markdown-to-PDF converters
const PAGE_BREAK: &str = "<div style=\"page-break-after: always\"></div>\n\n";

/// Markdown exporter
pub struct MarkdownExporter {
    /// Document title
    title: String,
    /// Include a table of contents
    include_toc: bool,
}

impl MarkdownExporter {
    /// Create a new Markdown exporter with default settings
    pub fn new() -> Self {
        Self {
            title: "Export Report".to_string(),
            include_toc: true,
        }
    }

    /// Set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set whether to include a table of contents
    pub fn with_toc(mut self, include: bool) -> Self {
        self.include_toc = include;
        self
    }

    fn render_header(&self, report: &RecordSet) -> String {
        let mut header = String::new();
        header.push_str(&format!("# {}\n\n", self.title));
        header.push_str(&format!("**Kind:** {}\n", report.kind));
        header.push_str(&format!("**Records:** {}\n", report.len()));
        if report.kind.has_comments() {
            header.push_str(&format!("**Comments:** {}\n", report.comment_count()));
        }
        header.push('\n');
        header
    }

    fn render_toc(&self, outline: &Outline) -> String {
        let mut toc = String::new();
        toc.push_str("## Contents\n\n");
        for (idx, entry) in outline.entries.iter().enumerate() {
            toc.push_str(&format!("{}. [{}](#{})\n", idx + 1, entry.title, entry.anchor));
        }
        toc.push('\n');
        toc.push_str(PAGE_BREAK);
        toc
    }

    /// Render a board or todo with its comments, closed by a page break
    fn render_record(&self, record: &Record, anchor: Option<String>) -> String {
        let mut output = String::new();

        let anchor = anchor.map(|a| format!("  {{#{}}}", a)).unwrap_or_default();
        output.push_str(&format!("## {}{}\n\n", record.heading(), anchor));

        if let Some(body) = record.body() {
            if !body.is_empty() {
                output.push_str(&body.lines().collect::<Vec<_>>().join("  \n"));
                output.push_str("\n\n");
            }
        }

        for comment in record.comments() {
            output.push_str(&render_comment(comment));
        }

        output.push_str(PAGE_BREAK);
        output
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for MarkdownExporter {
    fn export(&self, report: &RecordSet) -> Result<String> {
        let mut output = self.render_header(report);
        let outline = Outline::from_records(report);

        if self.include_toc && report.kind.supports_toc() && !outline.is_empty() {
            output.push_str(&self.render_toc(&outline));
        }

        for (position, record) in report.records.iter().enumerate() {
            match record {
                Record::Member(member) => {
                    output.push_str(&format!("- {}\n", member.summary()));
                }
                _ => {
                    let anchor = outline.anchor(position).map(|a| a.to_string());
                    output.push_str(&self.render_record(record, anchor));
                }
            }
        }

        Ok(output)
    }

    fn format_name(&self) -> &str {
        "markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Comment bodies already carry `<br />` breaks, which Markdown passes through
fn render_comment(comment: &Comment) -> String {
    let mut output = format!("### {}\n\n", comment.header());
    if !comment.body.is_empty() {
        output.push_str(&comment.body);
        output.push_str("\n\n");
    }
    output
}
