//! br-storage - Storage library for board-report
//!
//! This crate reads export CSV files and writes rendered reports to disk.

mod input_file;
pub mod paths;
mod report_writer;

pub use input_file::InputFile;
pub use report_writer::ReportWriter;
