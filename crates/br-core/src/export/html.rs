//! HTML exporter
//!
//! Produces a standalone, print-ready document: one page per board or todo,
//! a table of contents in front when the record kind supports one.

use super::exporter::Exporter;
use super::outline::Outline;
use crate::comment::Comment;
use crate::error::Result;
use crate::record::{Record, RecordSet};

const STYLE: &str = "\
body { margin: 2.5cm; }
h1.record { font-size: 12pt; margin-bottom: 10pt; }
h2.comment { font-size: 10pt; margin-bottom: 6pt; }
p.body { font-size: 8pt; margin-bottom: 4pt; }
nav.toc li { font-size: 10pt; }
.page-break { page-break-after: always; }
";

const PAGE_BREAK: &str = "<div class=\"page-break\"></div>\n";

/// HTML exporter
pub struct HtmlExporter {
    /// Document title
    title: String,
    /// Include a table of contents
    include_toc: bool,
}

impl HtmlExporter {
    /// Create a new HTML exporter with default settings
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

    fn render_head(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n",
            escape(&self.title),
            STYLE
        )
    }

    fn render_toc(&self, outline: &Outline) -> String {
        let mut toc = String::new();
        toc.push_str("<nav class=\"toc\">\n<h1>Contents</h1>\n<ol>\n");
        for entry in &outline.entries {
            toc.push_str(&format!(
                "<li><a href=\"#{}\">{}</a></li>\n",
                entry.anchor,
                escape(&entry.title)
            ));
        }
        toc.push_str("</ol>\n</nav>\n");
        toc.push_str(PAGE_BREAK);
        toc
    }

    /// One section per board or todo, closed by a page break
    fn render_section(&self, record: &Record, anchor: Option<String>) -> String {
        let mut output = String::new();

        match anchor {
            Some(id) => output.push_str(&format!("<section id=\"{}\">\n", id)),
            None => output.push_str("<section>\n"),
        }
        output.push_str(&format!(
            "<h1 class=\"record\">{}</h1>\n",
            escape(&record.heading())
        ));
        if let Some(body) = record.body() {
            output.push_str(&format!(
                "<p class=\"body\">{}</p>\n",
                escape_lines(body.lines())
            ));
        }
        for comment in record.comments() {
            output.push_str(&render_comment(comment));
        }
        output.push_str("</section>\n");
        output.push_str(PAGE_BREAK);
        output
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for HtmlExporter {
    fn export(&self, report: &RecordSet) -> Result<String> {
        let mut output = self.render_head();
        let outline = Outline::from_records(report);
        let with_toc = self.include_toc && report.kind.supports_toc() && !outline.is_empty();

        if with_toc {
            output.push_str(&self.render_toc(&outline));
        }

        for (position, record) in report.records.iter().enumerate() {
            match record {
                Record::Member(member) => {
                    output.push_str(&format!(
                        "<p class=\"body\">{}</p>\n",
                        escape(&member.summary())
                    ));
                }
                _ => {
                    let anchor = outline.anchor(position).map(|a| a.to_string());
                    output.push_str(&self.render_section(record, anchor));
                }
            }
        }

        output.push_str("</body>\n</html>\n");
        Ok(output)
    }

    fn format_name(&self) -> &str {
        "html"
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_comment(comment: &Comment) -> String {
    format!(
        "<h2 class=\"comment\">{}</h2>\n<p class=\"body\">{}</p>\n",
        escape(&comment.header()),
        escape_lines(comment.body_lines().into_iter())
    )
}

/// Escape each line and join them with line breaks
fn escape_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.map(escape).collect::<Vec<_>>().join("<br />\n")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
