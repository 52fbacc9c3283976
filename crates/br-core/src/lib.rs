//! br-core - Core library for board-report
//!
//! This crate provides the core logic for turning a groupware CSV export into a
//! paginated report: comment-block parsing, record mapping, date filtering and
//! export to document formats.

pub mod error;
pub mod types;
pub mod config;
pub mod comment;
pub mod record;
pub mod export;

pub use error::{ReportError, Result};
pub use types::*;
