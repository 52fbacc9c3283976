//! Export functionality for record sets
//!
//! This module provides the renderers that turn a [`RecordSet`] into a
//! report document.
//!
//! # Overview
//!
//! Export functionality supports:
//! - HTML (print-ready, one page per record)
//! - Markdown (headings with anchors and page-break markers)
//! - JSON (the parsed records, for further processing)
//!
//! # Example
//!
//! ```ignore
//! use br_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let html = manager.export(&records, "html")?;
//! ```
//!
//! [`RecordSet`]: crate::record::RecordSet

mod exporter;
mod html;
mod json;
mod markdown;
mod outline;

pub use exporter::{ExportManager, Exporter};
pub use html::HtmlExporter;
pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
pub use outline::{Outline, OutlineEntry};
