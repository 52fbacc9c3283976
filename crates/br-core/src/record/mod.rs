//! Record module
//!
//! Maps export rows to typed records, filters them by creation date and
//! orders them for rendering.

pub mod model;
pub mod range;
pub mod reader;

pub use model::{Board, Member, Record, Todo};
pub use range::DateRange;
pub use reader::{RecordReader, RecordSet};
