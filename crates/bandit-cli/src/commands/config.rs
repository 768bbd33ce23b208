//! Configuration management commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::settings::Settings;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a configuration file with the default values
    Init {
        /// Target file
        #[arg(long, default_value = "bandit.toml")]
        path: PathBuf,
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(cmd: ConfigCommands, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config_path),
        ConfigCommands::Init { path, force } => init(&path, force).map(|_| ()),
    }
}

fn show(config_path: Option<&Path>) -> Result<()> {
    let settings = Settings::load(config_path)?;
    println!("Current Configuration");
    println!("=====================\n");
    println!("{}", settings.to_toml()?);
    Ok(())
}

/// Returns whether the file was written
fn init(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(false);
    }

    let content = Settings::default().to_toml()?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created configuration file: {}", path.display());
    Ok(true)
}
