//! board-report - groupware export report generator
//!
//! Turns a board, todo or member CSV export into a paginated report.
//!
//! ## Quick Start
//!
//! ```bash
//! # Render a board export to HTML
//! board-report render boards.csv report
//!
//! # Only boards created in January, as Markdown
//! board-report render boards.csv report --format markdown \
//!     --from-date 2024/01/01 --to-date 2024/01/31
//!
//! # Check what an export contains
//! board-report inspect todos.csv
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
