//! Comment data models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line-break marker used inside comment bodies
pub const LINE_BREAK: &str = "<br />\n";

/// A comment recovered from an export comment block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Sequence number as declared in the export
    pub sequence: u64,
    /// Display name of the submitter
    pub submitter: String,
    /// When the comment was posted
    pub timestamp: NaiveDateTime,
    /// Body text, lines joined with [`LINE_BREAK`]
    pub body: String,
}

impl Comment {
    /// Create a comment with an empty body
    pub fn new(sequence: u64, submitter: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            sequence,
            submitter: submitter.into(),
            timestamp,
            body: String::new(),
        }
    }

    /// Body split back into its lines
    pub fn body_lines(&self) -> Vec<&str> {
        if self.body.is_empty() {
            return Vec::new();
        }
        self.body.split(LINE_BREAK).collect()
    }

    /// Header line shown above the body: `[seq] submitter (timestamp)`
    pub fn header(&self) -> String {
        format!(
            "[{}] {} ({})",
            self.sequence,
            self.submitter,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.header(), self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_header_format() {
        let comment = Comment::new(3, "alice", ts());
        assert_eq!(comment.header(), "[3] alice (2024-01-02 09:30:00)");
    }

    #[test]
    fn test_body_lines() {
        let mut comment = Comment::new(1, "bob", ts());
        assert!(comment.body_lines().is_empty());

        comment.body = format!("first{}second", LINE_BREAK);
        assert_eq!(comment.body_lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_display() {
        let mut comment = Comment::new(1, "bob", ts());
        comment.body = "hi".to_string();
        assert_eq!(comment.to_string(), "[1] bob (2024-01-02 09:30:00)\nhi");
    }
}
