//! Comment block parser
//!
//! Exports embed every comment of a record in one text cell:
//!
//! ```text
//! --------------------------------------------------
//! 2: Hanako Sato 2024/01/03 (Wed) 10:15
//!
//! Looks good to me.
//!
//! --------------------------------------------------
//! 1: Taro Suzuki 2024/1/2 (Tue) 9:05
//!
//! Please review.
//!
//! <footer>
//! ```
//!
//! The parser walks the lines once with a two-phase state machine and never
//! backtracks. The last line of a block is the export footer and is never
//! content.

use super::model::{Comment, LINE_BREAK};
use crate::error::{ReportError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Separator line: exactly 50 hyphens
pub const SEPARATOR: &str = "--------------------------------------------------";

/// Metadata line: `<seq>: <submitter> <YYYY>/<M>/<D> <filler> <H>:<MM>`
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]+): (.+?) ([0-9]{4})/([0-9]{1,2})/([0-9]{1,2}) (.*) ([0-9]{1,2}):([0-9]{1,2})",
    )
    .expect("valid regex")
});

/// Fields carried by a metadata line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentHeader {
    pub sequence: u64,
    pub submitter: String,
    pub timestamp: NaiveDateTime,
}

/// A line after classification against the current parser state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// The 50-hyphen separator
    Separator,
    /// A valid metadata line directly under a separator
    Header(CommentHeader),
    /// Anything else
    Text(&'a str),
}

/// Comment whose body is still being collected
#[derive(Debug, Clone)]
pub struct PartialComment {
    header: CommentHeader,
    buffer: Vec<String>,
}

impl PartialComment {
    fn new(header: CommentHeader) -> Self {
        Self {
            header,
            buffer: Vec::new(),
        }
    }

    /// Drop the first and last buffered line and join the rest
    fn finish(self) -> Comment {
        let kept: &[String] = if self.buffer.len() < 2 {
            &[]
        } else {
            &self.buffer[1..self.buffer.len() - 1]
        };

        Comment {
            sequence: self.header.sequence,
            submitter: self.header.submitter,
            timestamp: self.header.timestamp,
            body: kept.join(LINE_BREAK),
        }
    }
}

/// Parser phase
#[derive(Debug, Clone, Default)]
pub enum Phase {
    /// No comment started yet; text is record body and is skipped
    #[default]
    Idle,
    /// Collecting body lines for a comment
    InsideComment(PartialComment),
}

/// Full parser state between two lines
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    phase: Phase,
    after_separator: bool,
}

impl ParserState {
    /// Fresh state for a new block
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the previous line was a separator
    pub fn expects_header(&self) -> bool {
        self.after_separator
    }

    /// Whether a comment is currently open
    pub fn is_inside_comment(&self) -> bool {
        matches!(self.phase, Phase::InsideComment(_))
    }

    /// Consume one classified line, returning the next state and the comment
    /// closed by this line, if any
    pub fn step(self, line: LineClass<'_>) -> (ParserState, Option<Comment>) {
        match line {
            LineClass::Separator => (
                ParserState {
                    phase: self.phase,
                    after_separator: true,
                },
                None,
            ),
            LineClass::Header(header) => {
                let closed = match self.phase {
                    Phase::InsideComment(partial) => Some(partial.finish()),
                    Phase::Idle => None,
                };
                (
                    ParserState {
                        phase: Phase::InsideComment(PartialComment::new(header)),
                        after_separator: false,
                    },
                    closed,
                )
            }
            LineClass::Text(text) => {
                let phase = match self.phase {
                    Phase::InsideComment(mut partial) => {
                        partial.buffer.push(text.to_string());
                        Phase::InsideComment(partial)
                    }
                    Phase::Idle => Phase::Idle,
                };
                (
                    ParserState {
                        phase,
                        after_separator: false,
                    },
                    None,
                )
            }
        }
    }

    /// End of block. The footer line takes the last buffer slot, so the
    /// trimming rule removes it together with the leading padding line.
    pub fn finish(self, footer: &str) -> Option<Comment> {
        match self.phase {
            Phase::InsideComment(mut partial) => {
                partial.buffer.push(footer.to_string());
                Some(partial.finish())
            }
            Phase::Idle => None,
        }
    }
}

/// Parser for export comment blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentBlockParser;

impl CommentBlockParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw comment cell into comments, in source order
    pub fn parse(&self, raw: &str) -> Result<Vec<Comment>> {
        // Splits on \n and \r\n only; a lone \r, form feed or U+2028 stays in the line
        let lines: Vec<&str> = raw.lines().collect();
        let Some((footer, content)) = lines.split_last() else {
            return Ok(Vec::new());
        };

        let mut comments = Vec::new();
        let mut state = ParserState::new();

        for (idx, line) in content.iter().enumerate() {
            let class = self.classify(line, state.expects_header(), idx + 1)?;
            let (next, closed) = state.step(class);
            state = next;

            if let Some(comment) = closed {
                trace!(sequence = comment.sequence, "comment parsed");
                comments.push(comment);
            }
        }

        if let Some(comment) = state.finish(footer) {
            trace!(sequence = comment.sequence, "comment parsed");
            comments.push(comment);
        }

        debug!(
            lines = lines.len(),
            comments = comments.len(),
            "parsed comment block"
        );
        Ok(comments)
    }

    /// Classify a line. Metadata is only recognized (and validated) right
    /// after a separator.
    pub fn classify<'a>(
        &self,
        line: &'a str,
        after_separator: bool,
        line_number: usize,
    ) -> Result<LineClass<'a>> {
        if line == SEPARATOR {
            return Ok(LineClass::Separator);
        }

        if after_separator {
            if let Some(header) = self.parse_header(line, line_number)? {
                return Ok(LineClass::Header(header));
            }
        }

        Ok(LineClass::Text(line))
    }

    /// Parse a metadata line. `Ok(None)` when the line does not have the
    /// metadata shape; an error when it does but the fields are impossible.
    fn parse_header(&self, line: &str, line_number: usize) -> Result<Option<CommentHeader>> {
        let Some(caps) = HEADER_RE.captures(line) else {
            return Ok(None);
        };

        let invalid = |reason: &str| ReportError::Parse {
            line: line_number,
            text: line.to_string(),
            reason: reason.to_string(),
        };
        let field = |idx: usize| caps.get(idx).map_or("", |m| m.as_str());
        let number = |idx: usize| {
            field(idx)
                .parse::<u32>()
                .map_err(|_| invalid("numeric field out of range"))
        };

        let sequence = field(1)
            .parse::<u64>()
            .map_err(|_| invalid("sequence number out of range"))?;
        let submitter = field(2).to_string();
        let year = number(3)? as i32;
        let (month, day) = (number(4)?, number(5)?);
        let (hour, minute) = (number(7)?, number(8)?);

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid("date out of range"))?;
        let timestamp = date
            .and_hms_opt(hour, minute, 0)
            .ok_or_else(|| invalid("time out of range"))?;

        Ok(Some(CommentHeader {
            sequence,
            submitter,
            timestamp,
        }))
    }
}

/// Parse a raw comment cell with a default parser
pub fn parse_comments(raw: &str) -> Result<Vec<Comment>> {
    CommentBlockParser::new().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(lines: &[&str]) -> String {
        lines.join("\n")
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    const EXPORT_SAMPLE: &str = "--------------------------------------------------
2: 佐藤 花子 2024/01/03 (水) 10:15

了解です。
確認します。

--------------------------------------------------
1: 鈴木 2024/1/2 (火) 9:05

お願いします。

";

    #[test]
    fn test_only_newline_splits_lines() {
        let raw = [
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "",
            "a\rb\u{2028}c",
            "",
            "footer",
        ]
        .join("\n");
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "a\rb\u{2028}c<br />\n");
    }

    #[test]
    fn test_separator_is_fifty_hyphens() {
        assert_eq!(SEPARATOR.len(), 50);
        assert!(SEPARATOR.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_trailing_line_golden() {
        let raw = block(&[
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "line-a",
            "line-b",
            "SENTINEL",
        ]);
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].sequence, 1);
        assert_eq!(comments[0].submitter, "alice");
        assert_eq!(comments[0].timestamp, at(2024, 1, 2, 9, 30));
        assert_eq!(comments[0].body, "line-b");
    }

    #[test]
    fn test_trailing_line_golden_two_lines() {
        let raw = block(&[
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "hello",
            "bye",
            "SENTINEL",
        ]);
        let comments = parse_comments(&raw).unwrap();
        assert_eq!(comments[0].body, "bye");
    }

    #[test]
    fn test_export_sample() {
        let comments = parse_comments(EXPORT_SAMPLE).unwrap();

        assert_eq!(comments.len(), 2);

        assert_eq!(comments[0].sequence, 2);
        assert_eq!(comments[0].submitter, "佐藤 花子");
        assert_eq!(comments[0].timestamp, at(2024, 1, 3, 10, 15));
        assert_eq!(comments[0].body, "了解です。<br />\n確認します。");

        assert_eq!(comments[1].sequence, 1);
        assert_eq!(comments[1].submitter, "鈴木");
        assert_eq!(comments[1].timestamp, at(2024, 1, 2, 9, 5));
        assert_eq!(comments[1].body, "お願いします。");
    }

    #[test]
    fn test_idempotent() {
        let first = parse_comments(EXPORT_SAMPLE).unwrap();
        let second = parse_comments(EXPORT_SAMPLE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_multi_comment_split_does_not_leak() {
        let raw = block(&[
            SEPARATOR,
            "7: alice 2024/02/01 Thu 12:00",
            "",
            "first body",
            "",
            SEPARATOR,
            "3: bob 2024/01/31 Wed 08:00",
            "",
            "second body",
            "",
            "footer",
        ]);
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "first body");
        assert!(!comments[0].body.contains("second"));
        assert!(!comments[0].body.contains("bob"));
        assert_eq!(comments[1].sequence, 3);
        assert_eq!(comments[1].body, "second body<br />\n");
    }

    #[test]
    fn test_missing_separator_folds_into_open_comment() {
        let raw = block(&[
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "",
            "2: bob 2024/01/03 Wed 10:00",
            "text",
            "",
            "footer",
        ]);
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(
            comments[0].body,
            "2: bob 2024/01/03 Wed 10:00<br />\ntext<br />\n"
        );
    }

    #[test]
    fn test_missing_separator_without_open_comment_is_dropped() {
        let raw = block(&["1: alice 2024/01/02 Tue 09:30", "body", "", "footer"]);
        assert!(parse_comments(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_intervening_line_invalidates_header() {
        let raw = block(&[
            SEPARATOR,
            "",
            "1: alice 2024/01/02 Tue 09:30",
            "body",
            "footer",
        ]);
        assert!(parse_comments(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_separator_without_header_is_swallowed() {
        let raw = block(&[
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "",
            "a",
            SEPARATOR,
            "not a header",
            "b",
            "",
            "footer",
        ]);
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "a<br />\nnot a header<br />\nb<br />\n");
    }

    #[test]
    fn test_text_before_first_comment_is_discarded() {
        let raw = block(&[
            "record body",
            "more body",
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "",
            "comment",
            "",
            "footer",
        ]);
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments.len(), 1);
        assert!(!comments[0].body.contains("record body"));
    }

    #[test]
    fn test_malformed_month_is_error() {
        let raw = block(&[
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "",
            "ok",
            "",
            SEPARATOR,
            "2: bob 2024/13/02 Tue 09:30",
            "",
            "footer",
        ]);
        let err = parse_comments(&raw).unwrap_err();

        match err {
            ReportError::Parse { line, text, .. } => {
                assert_eq!(line, 7);
                assert_eq!(text, "2: bob 2024/13/02 Tue 09:30");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_time_is_error() {
        let raw = block(&[SEPARATOR, "1: alice 2024/01/02 Tue 24:00", "footer"]);
        assert!(matches!(
            parse_comments(&raw),
            Err(ReportError::Parse { .. })
        ));
    }

    #[test]
    fn test_malformed_header_without_separator_is_text() {
        let raw = block(&[
            SEPARATOR,
            "1: alice 2024/01/02 Tue 09:30",
            "",
            "9: bob 2024/13/45 Tue 09:30",
            "",
            "footer",
        ]);
        let comments = parse_comments(&raw).unwrap();
        assert_eq!(comments[0].body, "9: bob 2024/13/45 Tue 09:30<br />\n");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_comments("").unwrap().is_empty());
    }

    #[test]
    fn test_single_line_is_footer() {
        assert!(parse_comments(SEPARATOR).unwrap().is_empty());
        assert!(parse_comments("just text").unwrap().is_empty());
    }

    #[test]
    fn test_header_as_last_content_line_gives_empty_body() {
        let raw = block(&[SEPARATOR, "1: alice 2024/01/02 Tue 09:30", "footer"]);
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "");
    }

    #[test]
    fn test_header_as_footer_is_not_parsed() {
        let raw = block(&[SEPARATOR, "1: alice 2024/01/02 Tue 09:30"]);
        assert!(parse_comments(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let raw = format!("{SEPARATOR}\r\n1: alice 2024/01/02 Tue 09:30\r\n\r\nhi\r\n\r\nfooter");
        let comments = parse_comments(&raw).unwrap();

        assert_eq!(comments[0].submitter, "alice");
        assert_eq!(comments[0].body, "hi<br />\n");
    }

    #[test]
    fn test_header_filler_and_trailing_text() {
        let parser = CommentBlockParser::new();
        let class = parser
            .classify("12: Taro Yamada 2023/12/31 Sunday evening 23:59 (edited)", true, 1)
            .unwrap();

        assert_eq!(
            class,
            LineClass::Header(CommentHeader {
                sequence: 12,
                submitter: "Taro Yamada".to_string(),
                timestamp: at(2023, 12, 31, 23, 59),
            })
        );
    }

    #[test]
    fn test_classify_requires_separator() {
        let parser = CommentBlockParser::new();
        let line = "1: alice 2024/01/02 Tue 09:30";

        assert_eq!(parser.classify(line, false, 1).unwrap(), LineClass::Text(line));
        assert_eq!(parser.classify(SEPARATOR, false, 1).unwrap(), LineClass::Separator);
        assert_eq!(
            parser.classify(&SEPARATOR[1..], true, 1).unwrap(),
            LineClass::Text(&SEPARATOR[1..])
        );
    }

    #[test]
    fn test_state_machine_transitions() {
        let header = CommentHeader {
            sequence: 1,
            submitter: "alice".to_string(),
            timestamp: at(2024, 1, 2, 9, 30),
        };

        let state = ParserState::new();
        assert!(!state.expects_header());

        let (state, closed) = state.step(LineClass::Separator);
        assert!(state.expects_header());
        assert!(closed.is_none());

        let (state, closed) = state.step(LineClass::Header(header.clone()));
        assert!(state.is_inside_comment());
        assert!(!state.expects_header());
        assert!(closed.is_none());

        let (state, _) = state.step(LineClass::Text(""));
        let (state, _) = state.step(LineClass::Text("body"));
        let (state, _) = state.step(LineClass::Separator);
        let (state, closed) = state.step(LineClass::Header(header));

        let closed = closed.unwrap();
        assert_eq!(closed.body, "");
        assert!(state.is_inside_comment());
    }
}
