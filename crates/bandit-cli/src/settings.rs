//! Configuration loading for the Bandit Lab CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bandit_core::ExperimentConfig;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

/// Settings file layout
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub experiment: ExperimentConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for CSV and series files
    pub data_dir: PathBuf,
    /// Write `<strategy>_results.csv`
    pub csv: bool,
    /// Write `<strategy>_series.json`
    pub series: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            csv: true,
            series: false,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file, or the first file found, layered
    /// under `BANDIT__`-prefixed environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        if let Some(path) = &config_path {
            tracing::info!("Loading config from: {:?}", path);
            builder = builder.add_source(File::from(path.clone()).required(true));
        } else {
            tracing::debug!("No config file found, using defaults");
        }

        // e.g. BANDIT__EXPERIMENT__N_TRIALS=5000, BANDIT__EXPERIMENT__TRUE_MEANS=1,5
        builder = builder.add_source(
            Environment::with_prefix("BANDIT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("experiment.true_means"),
        );

        let config = builder.build().context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Find the configuration file
    pub fn find_config_file() -> Option<PathBuf> {
        // Check in order: ./bandit.toml, ~/.config/bandit/bandit.toml
        let local = PathBuf::from("bandit.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("bandit").join("bandit.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }
}
