//! Serializable experiment and strategy configuration

use serde::{Deserialize, Serialize};

use crate::arm::GaussianNoise;
use crate::epsilon_greedy::EpsilonGreedy;
use crate::error::{BanditError, Result};
use crate::experiment::Experiment;
use crate::strategy::Strategy;
use crate::thompson::ThompsonSampling;

/// Strategy selection with its hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    EpsilonGreedy {
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
    ThompsonSampling {
        #[serde(default = "default_tau")]
        tau: f64,
    },
}

fn default_epsilon() -> f64 {
    EpsilonGreedy::DEFAULT_EPSILON
}

fn default_tau() -> f64 {
    ThompsonSampling::DEFAULT_TAU
}

impl StrategyConfig {
    /// Construct the strategy, validating its hyperparameters
    pub fn build(&self) -> Result<Box<dyn Strategy>> {
        Ok(match *self {
            StrategyConfig::EpsilonGreedy { epsilon } => Box::new(EpsilonGreedy::new(epsilon)?),
            StrategyConfig::ThompsonSampling { tau } => Box::new(ThompsonSampling::new(tau)?),
        })
    }

    /// Parse a strategy name as accepted on the command line
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "epsilon_greedy" | "eg" => Ok(StrategyConfig::EpsilonGreedy {
                epsilon: default_epsilon(),
            }),
            "thompson_sampling" | "thompson" | "ts" => Ok(StrategyConfig::ThompsonSampling {
                tau: default_tau(),
            }),
            other => Err(BanditError::config(format!("unknown strategy: {other}"))),
        }
    }
}

/// Full description of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub true_means: Vec<f64>,
    pub n_trials: usize,
    /// Entropy-seeded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub noise_std: f64,
    pub strategies: Vec<StrategyConfig>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            true_means: vec![1.0, 2.0, 3.0, 4.0],
            n_trials: 20_000,
            seed: None,
            noise_std: 1.0,
            strategies: vec![
                StrategyConfig::EpsilonGreedy {
                    epsilon: default_epsilon(),
                },
                StrategyConfig::ThompsonSampling { tau: default_tau() },
            ],
        }
    }
}

impl ExperimentConfig {
    /// Check every field without running anything
    pub fn validate(&self) -> Result<()> {
        self.experiment()?;
        if self.strategies.is_empty() {
            return Err(BanditError::config("at least one strategy is required"));
        }
        for strategy in &self.strategies {
            strategy.build()?;
        }
        Ok(())
    }

    /// Build the runnable experiment
    pub fn experiment(&self) -> Result<Experiment> {
        let noise = GaussianNoise::new(self.noise_std)?;
        Ok(Experiment::new(&self.true_means, self.n_trials)?.with_noise(noise))
    }

    /// Build one fresh instance of every configured strategy
    pub fn build_strategies(&self) -> Result<Vec<Box<dyn Strategy>>> {
        self.strategies.iter().map(StrategyConfig::build).collect()
    }
}
