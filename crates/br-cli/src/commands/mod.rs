//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod inspect;
pub mod render;

use anyhow::{Context, Result};
use br_core::config::Config;
use br_core::record::DateRange;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// board-report - turn groupware CSV exports into paginated reports
#[derive(Debug, Parser)]
#[command(name = "board-report")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render an export file to a report
    Render(render::RenderArgs),

    /// Show what an export file contains
    Inspect(inspect::InspectArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Render(args) => render::execute(args, config_path),
        Commands::Inspect(args) => inspect::execute(args, config_path),
        Commands::Config(cmd) => config::execute(cmd, config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file to use: the explicit path, else the project file, else the
/// user file, if any of them exists
fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    [Config::default_path(), br_storage::paths::user_config_path()]
        .into_iter()
        .find(|path| path.exists())
}

/// Load the effective configuration; an explicit path must exist
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let local = Config::default_path();
            if local.exists() {
                local
            } else {
                br_storage::paths::user_config_path()
            }
        }
    };

    debug!("Using configuration {:?}", path);
    let config = if explicit.is_some() {
        Config::load(&path)
    } else {
        Config::load_or_default(&path)
    };
    config.with_context(|| format!("Failed to load configuration {}", path.display()))
}

/// clap value parser for `YYYY/MM/DD` date bounds
pub(crate) fn parse_date_bound(text: &str) -> std::result::Result<NaiveDate, String> {
    DateRange::parse_bound(text).map_err(|e| e.to_string())
}
