//! Experiment runner - drives a strategy through a fixed number of trials

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::arm::{ArmModel, GaussianNoise};
use crate::error::{BanditError, Result};
use crate::strategy::Strategy;

/// One trial of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub t: usize,
    pub chosen_arm: usize,
    pub reward: f64,
}

/// Outcome of a completed run: the trial log plus the arms it was run against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExperimentResult")]
pub struct ExperimentResult {
    pub(crate) strategy: String,
    pub(crate) true_means: Vec<f64>,
    pub(crate) records: Vec<TrialRecord>,
}

#[derive(Deserialize)]
struct RawExperimentResult {
    strategy: String,
    true_means: Vec<f64>,
    records: Vec<TrialRecord>,
}

impl TryFrom<RawExperimentResult> for ExperimentResult {
    type Error = BanditError;

    fn try_from(raw: RawExperimentResult) -> Result<Self> {
        let result = Self {
            strategy: raw.strategy,
            true_means: raw.true_means,
            records: raw.records,
        };
        result.validate()?;
        Ok(result)
    }
}

impl ExperimentResult {
    /// Check that the trial log is consistent with the arms: at least one
    /// trial, trial indices counting up from 0, chosen arms in range and
    /// finite rewards.
    pub fn validate(&self) -> Result<()> {
        let n_arms = ArmModel::new(&self.true_means)?.len();
        if self.records.is_empty() {
            return Err(BanditError::config("result has no trials"));
        }
        for (i, record) in self.records.iter().enumerate() {
            if record.t != i {
                return Err(BanditError::config(format!(
                    "trial {i} is recorded as t = {}",
                    record.t
                )));
            }
            if record.chosen_arm >= n_arms {
                return Err(BanditError::ArmOutOfRange {
                    arm: record.chosen_arm,
                    n_arms,
                });
            }
            if !record.reward.is_finite() {
                return Err(BanditError::config(format!(
                    "reward of trial {i} is not finite: {}",
                    record.reward
                )));
            }
        }
        Ok(())
    }

    /// Name of the strategy that produced this result
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn true_means(&self) -> &[f64] {
        &self.true_means
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn n_trials(&self) -> usize {
        self.records.len()
    }

    pub fn n_arms(&self) -> usize {
        self.true_means.len()
    }

    pub fn chosen_arms(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.chosen_arm).collect()
    }

    pub fn rewards(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.reward).collect()
    }
}

/// A validated experiment setup that can be run against any strategy
#[derive(Debug, Clone)]
pub struct Experiment {
    arms: ArmModel,
    n_trials: usize,
    noise: GaussianNoise,
}

impl Experiment {
    /// Create an experiment with unit Gaussian reward noise
    pub fn new(true_means: &[f64], n_trials: usize) -> Result<Self> {
        let arms = ArmModel::new(true_means)?;
        if n_trials == 0 {
            return Err(BanditError::config("number of trials must be positive"));
        }
        Ok(Self {
            arms,
            n_trials,
            noise: GaussianNoise::default(),
        })
    }

    /// Replace the reward sampler
    pub fn with_noise(mut self, noise: GaussianNoise) -> Self {
        self.noise = noise;
        self
    }

    pub fn arms(&self) -> &ArmModel {
        &self.arms
    }

    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    pub fn noise(&self) -> GaussianNoise {
        self.noise
    }

    /// Run the strategy from a fresh belief state.
    ///
    /// Every trial selects an arm, samples its reward and feeds it back
    /// before the next selection. The first error aborts the run and no
    /// partial result is returned.
    pub fn run(
        &self,
        strategy: &mut dyn Strategy,
        rng: &mut dyn RngCore,
    ) -> Result<ExperimentResult> {
        let true_means = self.arms.true_means();
        strategy.initialize(&true_means)?;

        let mut records = Vec::with_capacity(self.n_trials);
        for t in 0..self.n_trials {
            let chosen_arm = strategy.select_arm(t, &mut *rng)?;
            let mean = self.arms.arm(chosen_arm)?.true_mean;
            let reward = self.noise.sample(mean, &mut *rng);
            strategy.update(chosen_arm, reward)?;
            records.push(TrialRecord {
                t,
                chosen_arm,
                reward,
            });
        }

        Ok(ExperimentResult {
            strategy: strategy.name().to_string(),
            true_means,
            records,
        })
    }
}

/// Run `strategy` for `n_trials` against arms with the given true means
pub fn run(
    strategy: &mut dyn Strategy,
    true_means: &[f64],
    n_trials: usize,
    rng: &mut dyn RngCore,
) -> Result<ExperimentResult> {
    Experiment::new(true_means, n_trials)?.run(strategy, rng)
}
