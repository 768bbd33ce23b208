//! Decaying epsilon-greedy strategy

use std::fmt;

use rand::{Rng, RngCore};

use crate::arm::argmax;
use crate::error::{BanditError, Result};
use crate::strategy::{self, Strategy};

/// Explores uniformly with probability `epsilon / (t + 1)`, otherwise
/// exploits the arm with the highest running mean.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    counts: Vec<u64>,
    values: Vec<f64>,
}

impl EpsilonGreedy {
    pub const DEFAULT_EPSILON: f64 = 0.1;

    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(BanditError::config(format!(
                "epsilon must be positive and finite, got {epsilon}"
            )));
        }
        Ok(Self {
            epsilon,
            counts: Vec::new(),
            values: Vec::new(),
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Exploration probability at trial `t`
    pub fn epsilon_at(&self, t: usize) -> f64 {
        self.epsilon / (t as f64 + 1.0)
    }

    /// Pull counts per arm
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Running mean reward per arm
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            counts: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl Strategy for EpsilonGreedy {
    fn name(&self) -> &str {
        "Epsilon-Greedy"
    }

    fn initialize(&mut self, true_means: &[f64]) -> Result<()> {
        if true_means.is_empty() {
            return Err(BanditError::config("at least one arm is required"));
        }
        self.counts = vec![0; true_means.len()];
        self.values = vec![0.0; true_means.len()];
        Ok(())
    }

    fn arm_count(&self) -> usize {
        self.values.len()
    }

    fn select_arm(&self, t: usize, rng: &mut dyn RngCore) -> Result<usize> {
        let n_arms = self.values.len();
        if n_arms == 0 {
            return Err(BanditError::config("strategy used before initialize"));
        }

        if rng.gen::<f64>() < self.epsilon_at(t) {
            return Ok(rng.gen_range(0..n_arms));
        }
        Ok(argmax(self.values.iter().copied()))
    }

    fn update(&mut self, arm: usize, reward: f64) -> Result<()> {
        let n_arms = self.values.len();
        if arm >= n_arms {
            return Err(BanditError::ArmOutOfRange { arm, n_arms });
        }
        if !reward.is_finite() {
            return Err(BanditError::numeric(format!(
                "reward {reward} for arm {arm} is not finite"
            )));
        }

        self.counts[arm] += 1;
        let n = self.counts[arm] as f64;
        let value = self.values[arm];
        let updated = value + (reward - value) / n;
        if !updated.is_finite() {
            return Err(BanditError::numeric(format!(
                "value estimate for arm {arm} became {updated}"
            )));
        }
        self.values[arm] = updated;
        Ok(())
    }

    fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "epsilon": self.epsilon,
        })
    }
}

impl fmt::Display for EpsilonGreedy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        strategy::describe(self, f)
    }
}
