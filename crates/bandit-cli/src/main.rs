//! Bandit Lab CLI - run and compare multi-armed bandit strategies
//!
//! Results are summarized in the log and, depending on the output settings,
//! persisted as CSV trial logs and JSON curve series under the data directory.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_async)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod report;
mod settings;

use commands::{compare, config, run};

#[derive(Parser)]
#[command(name = "bandit")]
#[command(author, version, about = "Bandit Lab - multi-armed bandit strategy simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to BANDIT_CONFIG, ./bandit.toml, ~/.config/bandit/bandit.toml)
    #[arg(short, long, global = true, env = "BANDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single strategy
    Run(run::RunArgs),

    /// Run every configured strategy on the same arms and compare them
    Compare(compare::CompareArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Directive used when `RUST_LOG` is unset. Event targets start with the
/// binary's crate name, not the package name.
fn default_filter(level: &str) -> String {
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = cli.config.as_deref();
    let outcome = match cli.command {
        Commands::Run(args) => run::run(args, config_path).await,
        Commands::Compare(args) => compare::run(args, config_path).await,
        Commands::Config(cmd) => config::run(cmd, config_path).await,
    };

    if let Err(e) = &outcome {
        tracing::error!("{e:#}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_matches_event_targets() {
        assert_eq!(default_filter("info"), "bandit=info");

        let crate_name = module_path!().split("::").next().unwrap();
        assert_eq!(default_filter("debug"), format!("{crate_name}=debug"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(default_filter("info")).is_ok());
    }
}
