//! Export row reader

use super::model::{Board, Member, Record, Todo};
use super::range::DateRange;
use crate::comment::CommentBlockParser;
use crate::error::{ReportError, Result};
use crate::types::RecordKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Records read from one export, all of the same kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub kind: RecordKind,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of comments over all records
    pub fn comment_count(&self) -> usize {
        self.records.iter().map(|r| r.comments().len()).sum()
    }
}

/// Builds a record from a row of the right arity
type RowBuilder = fn(&CommentBlockParser, Vec<String>, usize) -> Result<Record>;

/// Row constructor for each record kind
fn row_builder(kind: RecordKind) -> RowBuilder {
    match kind {
        RecordKind::Board => build_board,
        RecordKind::Todo => build_todo,
        RecordKind::Member => build_member,
    }
}

fn build_board(parser: &CommentBlockParser, cells: Vec<String>, row: usize) -> Result<Record> {
    let cells = into_array(cells, row)?;
    Ok(Record::Board(Board::from_row(cells, row, parser)?))
}

fn build_todo(parser: &CommentBlockParser, cells: Vec<String>, row: usize) -> Result<Record> {
    let cells = into_array(cells, row)?;
    Ok(Record::Todo(Todo::from_row(cells, row, parser)?))
}

fn build_member(_parser: &CommentBlockParser, cells: Vec<String>, row: usize) -> Result<Record> {
    let cells = into_array(cells, row)?;
    Ok(Record::Member(Member::from_row(cells)))
}

/// Rows of the wrong arity fail here with [`ReportError::RecordShape`]
fn into_array<const N: usize>(cells: Vec<String>, row: usize) -> Result<[String; N]> {
    cells.try_into().map_err(|cells: Vec<String>| ReportError::RecordShape {
        row,
        expected: N,
        found: cells.len(),
    })
}

/// Reads export rows into records
#[derive(Debug, Clone, Default)]
pub struct RecordReader {
    parser: CommentBlockParser,
    range: DateRange,
}

impl RecordReader {
    /// Create a reader without date filtering
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep records created inside `range`
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Read rows; the first row is the header that decides the record kind.
    ///
    /// Kinds with a creation time come back newest first; other kinds keep
    /// input order.
    pub fn read<I>(&self, rows: I) -> Result<RecordSet>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        let kind = RecordKind::detect(header.as_slice())
            .ok_or_else(|| ReportError::UnsupportedFormat { header })?;
        let build = row_builder(kind);

        let mut records = Vec::new();
        let mut filtered = 0usize;

        for (idx, cells) in rows.enumerate() {
            let row = idx + 2;
            let record = build(&self.parser, cells, row)?;

            if let Some(created) = record.create_time().filter(|_| !self.range.is_unbounded()) {
                if !self.range.contains(created.date()) {
                    debug!(row, created = %created, "record outside date range");
                    filtered += 1;
                    continue;
                }
            }

            records.push(record);
        }

        if kind.has_create_time() {
            // Stable sort on the instant only; equal instants keep input order
            records.sort_by(|a, b| {
                let (a, b) = (a.create_time(), b.create_time());
                b.map(|t| t.value).cmp(&a.map(|t| t.value))
            });
        }

        info!(
            kind = %kind,
            records = records.len(),
            filtered,
            "read export"
        );

        Ok(RecordSet { kind, records })
    }
}
