//! CLI command modules

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::settings::Settings;

pub mod compare;
pub mod config;
pub mod run;

/// Overrides shared by `run` and `compare`
#[derive(Args, Debug, Default, Clone)]
pub struct ExperimentArgs {
    /// True mean reward of each arm, comma separated
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub means: Option<Vec<f64>>,

    /// Number of trials per run
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,

    /// Seed for the random generator
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Standard deviation of the reward noise
    #[arg(long)]
    pub noise_std: Option<f64>,

    /// Directory for CSV and series output
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Skip writing the CSV trial log
    #[arg(long)]
    pub no_csv: bool,

    /// Also write cumulative reward/regret series as JSON
    #[arg(long)]
    pub series: bool,
}

impl ExperimentArgs {
    /// Fold command line overrides into the loaded settings
    pub fn apply(self, settings: &mut Settings) {
        if let Some(means) = self.means {
            settings.experiment.true_means = means;
        }
        if let Some(trials) = self.trials {
            settings.experiment.n_trials = trials;
        }
        if let Some(seed) = self.seed {
            settings.experiment.seed = Some(seed);
        }
        if let Some(noise_std) = self.noise_std {
            settings.experiment.noise_std = noise_std;
        }
        if let Some(dir) = self.data_dir {
            settings.output.data_dir = dir;
        }
        if self.no_csv {
            settings.output.csv = false;
        }
        if self.series {
            settings.output.series = true;
        }
    }
}

/// Load settings and apply overrides
pub fn resolve(args: ExperimentArgs, config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::load(config_path)?;
    args.apply(&mut settings);
    Ok(settings)
}

/// Configured seed, or a fresh one that is logged so the run can be repeated
pub fn resolve_seed(settings: &Settings) -> u64 {
    match settings.experiment.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random();
            tracing::info!("No seed configured, using {seed}");
            seed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut settings = Settings::default();
        let args = ExperimentArgs {
            means: Some(vec![1.0, 5.0]),
            trials: Some(2000),
            seed: Some(3),
            noise_std: Some(0.5),
            data_dir: Some(PathBuf::from("out")),
            no_csv: true,
            series: true,
        };
        args.apply(&mut settings);

        assert_eq!(settings.experiment.true_means, vec![1.0, 5.0]);
        assert_eq!(settings.experiment.n_trials, 2000);
        assert_eq!(settings.experiment.seed, Some(3));
        assert_eq!(settings.experiment.noise_std, 0.5);
        assert_eq!(settings.output.data_dir, PathBuf::from("out"));
        assert!(!settings.output.csv);
        assert!(settings.output.series);
    }

    #[test]
    fn test_no_overrides_keeps_settings() {
        let mut settings = Settings::default();
        ExperimentArgs::default().apply(&mut settings);
        assert_eq!(settings.experiment, Settings::default().experiment);
        assert!(settings.output.csv);
    }

    #[test]
    fn test_resolve_seed_prefers_configured() {
        let mut settings = Settings::default();
        settings.experiment.seed = Some(99);
        assert_eq!(resolve_seed(&settings), 99);
    }
}
