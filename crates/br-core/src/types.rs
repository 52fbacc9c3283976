//! Core type definitions for board-report

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header of a board export
pub const BOARD_HEADER: [&str; 8] = [
    "ID", "タイトル", "本文", "作成者", "作成日時", "更新者", "更新日時", "コメント",
];

/// Header of a todo export
pub const TODO_HEADER: [&str; 12] = [
    "ID", "タイトル", "本文", "作成者", "作成日時", "更新者", "更新日時", "ステータス", "優先度",
    "担当者", "期日", "コメント",
];

/// Header of a member export
pub const MEMBER_HEADER: [&str; 5] = ["姓", "名", "よみがな姓", "よみがな名", "メールアドレス"];

/// Kind of record held by an export file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Bulletin board topic
    Board,
    /// Todo item
    Todo,
    /// Member directory entry
    Member,
}

/// Static description of a record kind
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: RecordKind,
    /// Column names, order-sensitive
    pub header: &'static [&'static str],
    pub has_comments: bool,
    pub has_create_time: bool,
    pub supports_toc: bool,
}

/// Every known export layout
pub const KIND_TABLE: [KindSpec; 3] = [
    KindSpec {
        kind: RecordKind::Board,
        header: &BOARD_HEADER,
        has_comments: true,
        has_create_time: true,
        supports_toc: true,
    },
    KindSpec {
        kind: RecordKind::Todo,
        header: &TODO_HEADER,
        has_comments: true,
        has_create_time: true,
        supports_toc: true,
    },
    KindSpec {
        kind: RecordKind::Member,
        header: &MEMBER_HEADER,
        has_comments: false,
        has_create_time: false,
        supports_toc: false,
    },
];

impl RecordKind {
    /// All kinds in table order
    pub const ALL: [RecordKind; 3] = [RecordKind::Board, RecordKind::Todo, RecordKind::Member];

    /// Detect the kind from a header row (exact, order-sensitive match)
    pub fn detect<S: AsRef<str>>(header: &[S]) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|spec| {
                spec.header.len() == header.len()
                    && spec
                        .header
                        .iter()
                        .zip(header)
                        .all(|(expected, actual)| *expected == actual.as_ref())
            })
            .map(|spec| spec.kind)
    }

    /// Static description for this kind
    pub fn spec(&self) -> &'static KindSpec {
        match self {
            RecordKind::Board => &KIND_TABLE[0],
            RecordKind::Todo => &KIND_TABLE[1],
            RecordKind::Member => &KIND_TABLE[2],
        }
    }

    /// Number of columns a row of this kind must have
    pub fn column_count(&self) -> usize {
        self.spec().header.len()
    }

    pub fn has_comments(&self) -> bool {
        self.spec().has_comments
    }

    pub fn has_create_time(&self) -> bool {
        self.spec().has_create_time
    }

    /// Whether rendered reports get a table of contents
    pub fn supports_toc(&self) -> bool {
        self.spec().supports_toc
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Board => "board",
            RecordKind::Todo => "todo",
            RecordKind::Member => "member",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cell layouts accepted for export timestamps
const EXPORT_TIME_FORMATS: [&str; 4] = [
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const EXPORT_DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Timestamp cell from an export, keeping the original text for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTime {
    /// Cell text as exported
    pub raw: String,
    /// Parsed value
    pub value: NaiveDateTime,
}

impl ExportTime {
    /// Parse a timestamp cell; date-only cells map to midnight
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        let value = EXPORT_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                EXPORT_DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })?;

        Some(Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// Calendar date of the timestamp
    pub fn date(&self) -> NaiveDate {
        self.value.date()
    }
}

impl fmt::Display for ExportTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Stable anchor for a record section in a rendered report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordAnchor(pub String);

impl RecordAnchor {
    /// Derive an anchor from the record kind, its id and its position; the
    /// position keeps duplicate ids apart
    pub fn new(kind: RecordKind, id: &str, position: usize) -> Self {
        let hash = blake3::hash(format!("{}:{}:{}", kind, id, position).as_bytes());
        RecordAnchor(format!("r_{}", &hash.to_hex()[..12]))
    }
}

impl fmt::Display for RecordAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_headers() {
        assert_eq!(RecordKind::detect(&BOARD_HEADER), Some(RecordKind::Board));
        assert_eq!(RecordKind::detect(&TODO_HEADER), Some(RecordKind::Todo));
        assert_eq!(RecordKind::detect(&MEMBER_HEADER), Some(RecordKind::Member));
    }

    #[test]
    fn test_detect_rejects_single_differing_cell() {
        let mut header: Vec<String> = BOARD_HEADER.iter().map(|s| s.to_string()).collect();
        header[2] = "本文 ".to_string();
        assert_eq!(RecordKind::detect(&header), None);
    }

    #[test]
    fn test_detect_is_order_sensitive() {
        let mut header = MEMBER_HEADER;
        header.swap(0, 1);
        assert_eq!(RecordKind::detect(&header), None);
    }

    #[test]
    fn test_detect_rejects_prefix() {
        assert_eq!(RecordKind::detect(&BOARD_HEADER[..7]), None);
    }

    #[test]
    fn test_capabilities() {
        assert!(RecordKind::Board.has_comments());
        assert!(RecordKind::Todo.has_create_time());
        assert!(RecordKind::Todo.supports_toc());
        assert!(!RecordKind::Member.has_comments());
        assert!(!RecordKind::Member.has_create_time());
        assert!(!RecordKind::Member.supports_toc());
        assert_eq!(RecordKind::Todo.column_count(), 12);
    }

    #[test]
    fn test_spec_table_matches_kind() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_export_time_layouts() {
        let t = ExportTime::parse("2024/01/02 09:30").unwrap();
        assert_eq!(t.value.to_string(), "2024-01-02 09:30:00");
        assert_eq!(t.raw, "2024/01/02 09:30");

        let t = ExportTime::parse("2024/1/2 9:05:07").unwrap();
        assert_eq!(t.value.to_string(), "2024-01-02 09:05:07");

        let t = ExportTime::parse("2024/03/01").unwrap();
        assert_eq!(t.value.to_string(), "2024-03-01 00:00:00");

        assert!(ExportTime::parse("yesterday").is_none());
        assert!(ExportTime::parse("2024/13/01").is_none());
    }

    #[test]
    fn test_export_time_same_instant_different_text() {
        let a = ExportTime::parse("2024/01/01").unwrap();
        let b = ExportTime::parse("2024/01/01 00:00").unwrap();
        assert_eq!(a.value, b.value);
        assert_ne!(a, b);
        assert_eq!(a.date(), b.date());
    }

    #[test]
    fn test_record_anchor_separates_duplicate_ids() {
        let a = RecordAnchor::new(RecordKind::Board, "12", 0);
        let b = RecordAnchor::new(RecordKind::Board, "12", 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_anchor_is_stable() {
        let a = RecordAnchor::new(RecordKind::Board, "12", 0);
        let b = RecordAnchor::new(RecordKind::Board, "12", 0);
        let c = RecordAnchor::new(RecordKind::Todo, "12", 0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.0.starts_with("r_"));
        assert_eq!(a.0.len(), 14);
    }
}
