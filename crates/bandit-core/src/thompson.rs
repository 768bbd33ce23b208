//! Gaussian Thompson sampling
//!
//! Each arm keeps a Normal posterior over its mean reward with mean `m` and
//! precision `lambda`, starting from the prior N(0, 1). Observations are
//! assumed Normal with known precision `tau`, which makes the posterior
//! update closed-form:
//!
//! ```text
//! m      <- (tau * r + lambda * m) / (tau + lambda)
//! lambda <- lambda + tau
//! ```
//!
//! Selection draws one sample per arm from its posterior and picks the
//! largest.

use std::fmt;

use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

use crate::arm::argmax;
use crate::error::{BanditError, Result};
use crate::strategy::{self, Strategy};

/// Thompson sampling with a Gaussian-Gaussian conjugate posterior per arm
#[derive(Debug, Clone)]
pub struct ThompsonSampling {
    tau: f64,
    means: Vec<f64>,
    precisions: Vec<f64>,
}

impl ThompsonSampling {
    pub const DEFAULT_TAU: f64 = 1.0;

    pub fn new(tau: f64) -> Result<Self> {
        if !tau.is_finite() || tau <= 0.0 {
            return Err(BanditError::config(format!(
                "tau must be positive and finite, got {tau}"
            )));
        }
        Ok(Self {
            tau,
            means: Vec::new(),
            precisions: Vec::new(),
        })
    }

    /// Observation precision
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Posterior means
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Posterior precisions
    pub fn precisions(&self) -> &[f64] {
        &self.precisions
    }
}

impl Default for ThompsonSampling {
    fn default() -> Self {
        Self {
            tau: Self::DEFAULT_TAU,
            means: Vec::new(),
            precisions: Vec::new(),
        }
    }
}

impl Strategy for ThompsonSampling {
    fn name(&self) -> &str {
        "Thompson-Sampling"
    }

    fn initialize(&mut self, true_means: &[f64]) -> Result<()> {
        if true_means.is_empty() {
            return Err(BanditError::config("at least one arm is required"));
        }
        self.means = vec![0.0; true_means.len()];
        self.precisions = vec![1.0; true_means.len()];
        Ok(())
    }

    fn arm_count(&self) -> usize {
        self.means.len()
    }

    fn select_arm(&self, _t: usize, rng: &mut dyn RngCore) -> Result<usize> {
        if self.means.is_empty() {
            return Err(BanditError::config("strategy used before initialize"));
        }

        let mut samples = Vec::with_capacity(self.means.len());
        for (i, (&m, &lambda)) in self.means.iter().zip(&self.precisions).enumerate() {
            let z: f64 = StandardNormal.sample(&mut *rng);
            let x = m + z / lambda.sqrt();
            if !x.is_finite() {
                return Err(BanditError::numeric(format!(
                    "posterior sample for arm {i} is {x} (m={m}, lambda={lambda})"
                )));
            }
            samples.push(x);
        }

        Ok(argmax(samples))
    }

    fn update(&mut self, arm: usize, reward: f64) -> Result<()> {
        let n_arms = self.means.len();
        if arm >= n_arms {
            return Err(BanditError::ArmOutOfRange { arm, n_arms });
        }
        if !reward.is_finite() {
            return Err(BanditError::numeric(format!(
                "reward {reward} for arm {arm} is not finite"
            )));
        }

        // Mean first: it must see the pre-update precision
        let lambda = self.precisions[arm];
        let m = (self.tau * reward + lambda * self.means[arm]) / (self.tau + lambda);
        let lambda = lambda + self.tau;
        if !m.is_finite() || !lambda.is_finite() {
            return Err(BanditError::numeric(format!(
                "posterior for arm {arm} became m={m}, lambda={lambda}"
            )));
        }

        self.means[arm] = m;
        self.precisions[arm] = lambda;
        Ok(())
    }

    fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "tau": self.tau,
        })
    }
}

impl fmt::Display for ThompsonSampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        strategy::describe(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn initialized(tau: f64, n_arms: usize) -> ThompsonSampling {
        let mut ts = ThompsonSampling::new(tau).unwrap();
        ts.initialize(&vec![0.0; n_arms]).unwrap();
        ts
    }

    #[test]
    fn test_invalid_tau() {
        assert!(ThompsonSampling::new(0.0).is_err());
        assert!(ThompsonSampling::new(-1.0).is_err());
        assert!(ThompsonSampling::new(f64::NAN).is_err());
    }

    #[test]
    fn test_prior() {
        let ts = initialized(1.0, 3);
        assert_eq!(ts.means(), &[0.0; 3]);
        assert_eq!(ts.precisions(), &[1.0; 3]);
        assert_eq!(ts.arm_count(), 3);
    }

    #[test]
    fn test_conjugate_update_uses_pre_update_precision() {
        let mut ts = initialized(2.0, 2);
        ts.update(0, 3.0).unwrap();

        // (2*3 + 1*0) / (2 + 1) = 2
        assert!((ts.means()[0] - 2.0).abs() < 1e-12);
        assert_eq!(ts.precisions()[0], 3.0);

        ts.update(0, 5.0).unwrap();
        // (2*5 + 3*2) / (2 + 3) = 3.2
        assert!((ts.means()[0] - 3.2).abs() < 1e-12);
        assert_eq!(ts.precisions()[0], 5.0);

        assert_eq!(ts.means()[1], 0.0);
        assert_eq!(ts.precisions()[1], 1.0);
    }

    #[test]
    fn test_precision_non_decreasing() {
        let mut ts = initialized(1.0, 3);
        let mut rng = StdRng::seed_from_u64(5);
        let mut prev = ts.precisions().to_vec();
        for t in 0..500 {
            let arm = ts.select_arm(t, &mut rng).unwrap();
            ts.update(arm, arm as f64).unwrap();
            for (before, after) in prev.iter().zip(ts.precisions()) {
                assert!(after >= before);
            }
            prev = ts.precisions().to_vec();
        }
    }

    #[test]
    fn test_posterior_concentrates() {
        let mut ts = initialized(1.0, 1);
        for _ in 0..1000 {
            ts.update(0, 4.0).unwrap();
        }
        assert!((ts.means()[0] - 4.0).abs() < 0.01);
        assert_eq!(ts.precisions()[0], 1001.0);
    }

    #[test]
    fn test_select_prefers_confident_best_arm() {
        let mut ts = initialized(1.0, 2);
        for _ in 0..200 {
            ts.update(0, 0.0).unwrap();
            ts.update(1, 10.0).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(21);
        for t in 0..100 {
            assert_eq!(ts.select_arm(t, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_update_out_of_range() {
        let mut ts = initialized(1.0, 2);
        assert_eq!(
            ts.update(5, 1.0).unwrap_err(),
            BanditError::ArmOutOfRange { arm: 5, n_arms: 2 }
        );
    }

    #[test]
    fn test_overflowing_update_detected() {
        let mut ts = initialized(f64::MAX, 1);
        // lambda = 1 + MAX stays finite, the second update overflows it
        ts.update(0, 1.0).unwrap();
        let err = ts.update(0, 1.0).unwrap_err();
        assert!(matches!(err, BanditError::NumericInstability(_)));
        assert!(ts.precisions()[0].is_finite());
    }

    #[test]
    fn test_select_before_initialize_fails() {
        let ts = ThompsonSampling::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ts.select_arm(0, &mut rng).is_err());
    }

    #[test]
    fn test_display() {
        let ts = initialized(1.0, 2);
        assert_eq!(ts.to_string(), "Thompson-Sampling Bandit with 2 arms");
    }
}
