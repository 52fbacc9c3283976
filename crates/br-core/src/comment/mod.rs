//! Comment handling module
//!
//! Recovers the comment threads that groupware exports embed in a single
//! text cell.

pub mod model;
pub mod parser;

pub use model::{Comment, LINE_BREAK};
pub use parser::{
    parse_comments, CommentBlockParser, CommentHeader, LineClass, ParserState, SEPARATOR,
};
