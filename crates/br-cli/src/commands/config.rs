//! Config command
//!
//! Manage board-report configuration.

use anyhow::{bail, Context, Result};
use br_core::config::Config;
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};

use super::{load_config, resolve_config_path};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate the configuration file
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Init { force } => init_config(config_path, force),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

fn show_config(config_path: Option<&Path>, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = load_config(config_path)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    match resolve_config_path(config_path) {
        Some(path) => println!("{}", path.display().to_string().dimmed()),
        None => println!("{}", "(defaults, no configuration file)".dimmed()),
    }
    println!();
    println!("{}", config.to_toml()?);

    Ok(())
}

fn init_config(config_path: Option<&Path>, force: bool) -> Result<()> {
    use colored::Colorize;

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    if path.exists() {
        if !force {
            use dialoguer::Confirm;

            let confirmed = Confirm::new()
                .with_prompt(format!("Overwrite {}?", path.display()))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("Init cancelled.");
                return Ok(());
            }
        }

        let backup = backup_path(&path);
        fs::copy(&path, &backup)
            .with_context(|| format!("Failed to back up {}", path.display()))?;
        println!("{} Backed up to {}", "✓".green(), backup.display());
    }

    let content = format!(
        "# board-report configuration\n\n{}",
        Config::default().to_toml()?
    );
    br_storage::ReportWriter::write(&path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote default configuration to {}", "✓".green(), path.display());
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let Some(path) = resolve_config_path(config_path) else {
        println!(
            "{} No configuration file, defaults are in use",
            "⚠".yellow()
        );
        return Ok(());
    };

    match Config::load(&path) {
        Ok(_) => {
            println!("{} {} is valid", "✓".green(), path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            bail!("Configuration {} is invalid", path.display())
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    PathBuf::from(format!(
        "{}.backup-{}",
        path.display(),
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}
