//! Single strategy run

use std::path::Path;

use anyhow::{Context, Result};
use bandit_core::{derive_seed, report, StrategyConfig};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::ExperimentArgs;
use crate::report::from_output;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Strategy to run: epsilon-greedy (eg) or thompson-sampling (ts).
    /// Defaults to the first configured strategy.
    #[arg(long)]
    pub strategy: Option<String>,

    /// Initial exploration rate for epsilon-greedy
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Observation precision for Thompson sampling
    #[arg(long)]
    pub tau: Option<f64>,

    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

impl RunArgs {
    /// Pick the strategy to run and apply hyperparameter overrides
    fn strategy_config(&self, configured: &[StrategyConfig]) -> Result<StrategyConfig> {
        let mut config = match &self.strategy {
            Some(name) => StrategyConfig::from_name(name)?,
            None => configured
                .first()
                .cloned()
                .context("No strategy given and none configured")?,
        };

        match &mut config {
            StrategyConfig::EpsilonGreedy { epsilon } => {
                if let Some(value) = self.epsilon {
                    *epsilon = value;
                }
            }
            StrategyConfig::ThompsonSampling { tau } => {
                if let Some(value) = self.tau {
                    *tau = value;
                }
            }
        }
        Ok(config)
    }
}

pub async fn run(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let settings = super::resolve(args.experiment.clone(), config_path)?;
    let strategy_config = args.strategy_config(&settings.experiment.strategies)?;

    let experiment = settings
        .experiment
        .experiment()
        .context("Invalid experiment configuration")?;
    let mut strategy = strategy_config
        .build()
        .context("Invalid strategy configuration")?;
    let seed = super::resolve_seed(&settings);

    debug!("Strategy parameters: {}", strategy.params());
    info!(
        "Starting experiment for {} with {} trials.",
        strategy.name(),
        experiment.n_trials()
    );
    let mut rng = StdRng::seed_from_u64(derive_seed(seed, 0));
    let result = experiment
        .run(strategy.as_mut(), &mut rng)
        .with_context(|| format!("{} run failed", strategy.name()))?;
    info!("Finished experiment for {}.", strategy);

    let mut reporters = from_output(&settings.output);
    report::report_all(&mut reporters, &result)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strategy: Option<&str>) -> RunArgs {
        RunArgs {
            strategy: strategy.map(str::to_string),
            epsilon: Some(0.3),
            tau: Some(2.0),
            experiment: ExperimentArgs::default(),
        }
    }

    #[test]
    fn test_strategy_from_flag_with_override() {
        let config = args(Some("eg")).strategy_config(&[]).unwrap();
        assert_eq!(config, StrategyConfig::EpsilonGreedy { epsilon: 0.3 });

        let config = args(Some("thompson-sampling")).strategy_config(&[]).unwrap();
        assert_eq!(config, StrategyConfig::ThompsonSampling { tau: 2.0 });
    }

    #[test]
    fn test_strategy_falls_back_to_configured() {
        let configured = [StrategyConfig::ThompsonSampling { tau: 1.0 }];
        let config = args(None).strategy_config(&configured).unwrap();
        assert_eq!(config, StrategyConfig::ThompsonSampling { tau: 2.0 });
    }

    #[test]
    fn test_strategy_missing() {
        assert!(args(None).strategy_config(&[]).is_err());
        assert!(args(Some("ucb")).strategy_config(&[]).is_err());
    }
}
