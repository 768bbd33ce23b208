//! Arm model and reward sampling

use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};

/// One arm of the bandit with its fixed true mean reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    pub index: usize,
    pub true_mean: f64,
}

/// Immutable set of arms used for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmModel {
    arms: Vec<Arm>,
}

impl ArmModel {
    /// Build the model from true means. Rejects an empty list and non-finite means.
    pub fn new(true_means: &[f64]) -> Result<Self> {
        if true_means.is_empty() {
            return Err(BanditError::config("at least one arm is required"));
        }
        if let Some(i) = true_means.iter().position(|m| !m.is_finite()) {
            return Err(BanditError::config(format!(
                "true mean of arm {i} is not finite: {}",
                true_means[i]
            )));
        }

        let arms = true_means
            .iter()
            .enumerate()
            .map(|(index, &true_mean)| Arm { index, true_mean })
            .collect();

        Ok(Self { arms })
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn arm(&self, index: usize) -> Result<&Arm> {
        self.arms.get(index).ok_or(BanditError::ArmOutOfRange {
            arm: index,
            n_arms: self.arms.len(),
        })
    }

    pub fn true_means(&self) -> Vec<f64> {
        self.arms.iter().map(|a| a.true_mean).collect()
    }

    /// Index of the best arm; the lowest index wins ties
    pub fn optimal_arm(&self) -> usize {
        argmax(self.arms.iter().map(|a| a.true_mean))
    }

    pub fn optimal_mean(&self) -> f64 {
        self.arms[self.optimal_arm()].true_mean
    }
}

/// Reward sampler adding zero-mean Gaussian noise to an arm's true mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianNoise {
    std_dev: f64,
}

impl GaussianNoise {
    pub fn new(std_dev: f64) -> Result<Self> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(BanditError::config(format!(
                "noise standard deviation must be positive and finite, got {std_dev}"
            )));
        }
        Ok(Self { std_dev })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draw one observation around `mean`
    pub fn sample(&self, mean: f64, rng: &mut dyn RngCore) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        mean + self.std_dev * z
    }
}

impl Default for GaussianNoise {
    fn default() -> Self {
        Self { std_dev: 1.0 }
    }
}

/// Index of the largest value, first occurrence on ties.
///
/// NaN entries never win. Returns 0 for an empty iterator.
pub(crate) fn argmax(values: impl IntoIterator<Item = f64>) -> usize {
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, v) in values.into_iter().enumerate() {
        if v > best {
            best = v;
            best_idx = i;
        }
    }
    best_idx
}
