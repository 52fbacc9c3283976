//! Record data models

use crate::comment::{Comment, CommentBlockParser};
use crate::error::{ReportError, Result};
use crate::types::{ExportTime, RecordKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bulletin board topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    pub body: String,
    pub creator: String,
    pub create_time: ExportTime,
    pub updator: String,
    pub update_time: String,
    /// Comments in export order
    pub comments: Vec<Comment>,
}

impl Board {
    /// Build from a board row (`row` is the 1-based row number in the file)
    pub fn from_row(cells: [String; 8], row: usize, parser: &CommentBlockParser) -> Result<Self> {
        let [id, title, body, creator, create_time, updator, update_time, comments] = cells;

        Ok(Self {
            create_time: parse_create_time(&create_time, row)?,
            comments: parser.parse(&comments)?,
            id,
            title,
            body,
            creator,
            updator,
            update_time,
        })
    }

    /// Section heading: `title [id] / creator (created)`
    pub fn heading(&self) -> String {
        format!(
            "{} [{}] / {} ({})",
            self.title, self.id, self.creator, self.create_time
        )
    }
}

/// Todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub body: String,
    pub creator: String,
    pub create_time: ExportTime,
    pub updator: String,
    pub update_time: String,
    pub status: String,
    pub priority: String,
    /// Person in charge
    pub assignee: String,
    pub due: String,
    /// Comments in export order
    pub comments: Vec<Comment>,
}

impl Todo {
    /// Build from a todo row (`row` is the 1-based row number in the file)
    pub fn from_row(cells: [String; 12], row: usize, parser: &CommentBlockParser) -> Result<Self> {
        let [id, title, body, creator, create_time, updator, update_time, status, priority, assignee, due, comments] =
            cells;

        Ok(Self {
            create_time: parse_create_time(&create_time, row)?,
            comments: parser.parse(&comments)?,
            id,
            title,
            body,
            creator,
            updator,
            update_time,
            status,
            priority,
            assignee,
            due,
        })
    }

    /// Section heading: `title [id] / creator (created) / status, priority, assignee, due`
    pub fn heading(&self) -> String {
        format!(
            "{} [{}] / {} ({}) / {}, {}, {}, {}",
            self.title,
            self.id,
            self.creator,
            self.create_time,
            self.status,
            self.priority,
            self.assignee,
            self.due
        )
    }
}

/// Member directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub surname: String,
    pub given_name: String,
    pub surname_reading: String,
    pub given_name_reading: String,
    pub email: String,
}

impl Member {
    pub fn from_row(cells: [String; 5]) -> Self {
        let [surname, given_name, surname_reading, given_name_reading, email] = cells;
        Self {
            surname,
            given_name,
            surname_reading,
            given_name_reading,
            email,
        }
    }

    /// Directory line: `surname given (reading reading) / email`
    pub fn summary(&self) -> String {
        format!(
            "{} {} ({} {}) / {}",
            self.surname, self.given_name, self.surname_reading, self.given_name_reading, self.email
        )
    }
}

/// A record read from an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Board(Board),
    Todo(Todo),
    Member(Member),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Board(_) => RecordKind::Board,
            Record::Todo(_) => RecordKind::Todo,
            Record::Member(_) => RecordKind::Member,
        }
    }

    /// Export id, if the kind has one
    pub fn id(&self) -> Option<&str> {
        match self {
            Record::Board(b) => Some(&b.id),
            Record::Todo(t) => Some(&t.id),
            Record::Member(_) => None,
        }
    }

    /// Creation time, if the kind has one
    pub fn create_time(&self) -> Option<&ExportTime> {
        match self {
            Record::Board(b) => Some(&b.create_time),
            Record::Todo(t) => Some(&t.create_time),
            Record::Member(_) => None,
        }
    }

    /// Comments, empty for kinds without comments
    pub fn comments(&self) -> &[Comment] {
        match self {
            Record::Board(b) => &b.comments,
            Record::Todo(t) => &t.comments,
            Record::Member(_) => &[],
        }
    }

    /// Record body text, if the kind has one
    pub fn body(&self) -> Option<&str> {
        match self {
            Record::Board(b) => Some(&b.body),
            Record::Todo(t) => Some(&t.body),
            Record::Member(_) => None,
        }
    }

    /// Heading used for the record's section
    pub fn heading(&self) -> String {
        match self {
            Record::Board(b) => b.heading(),
            Record::Todo(t) => t.heading(),
            Record::Member(m) => m.summary(),
        }
    }

    /// Short title for tables of contents and listings
    pub fn title(&self) -> String {
        match self {
            Record::Board(b) => format!("{} [{}]", b.title, b.id),
            Record::Todo(t) => format!("{} [{}]", t.title, t.id),
            Record::Member(m) => format!("{} {}", m.surname, m.given_name),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.body() {
            Some(body) => write!(f, "{}\n{}", self.heading(), body),
            None => write!(f, "{}", self.heading()),
        }
    }
}

fn parse_create_time(raw: &str, row: usize) -> Result<ExportTime> {
    ExportTime::parse(raw).ok_or_else(|| ReportError::InvalidField {
        row,
        column: "作成日時".to_string(),
        value: raw.to_string(),
    })
}
