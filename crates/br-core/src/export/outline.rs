//! Table of contents for rendered reports

use crate::record::RecordSet;
use crate::types::RecordAnchor;

/// One table-of-contents line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub anchor: RecordAnchor,
    pub title: String,
}

/// Section anchors and titles of a report, in render order
#[derive(Debug, Clone, Default)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

impl Outline {
    /// Build the outline of a record set
    pub fn from_records(report: &RecordSet) -> Self {
        let entries = report
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let key = record.id().map(str::to_string).unwrap_or_else(|| record.title());
                OutlineEntry {
                    anchor: RecordAnchor::new(report.kind, &key, position),
                    title: record.title(),
                }
            })
            .collect();

        Self { entries }
    }

    /// Anchor of the record at `position`
    pub fn anchor(&self, position: usize) -> Option<&RecordAnchor> {
        self.entries.get(position).map(|e| &e.anchor)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
