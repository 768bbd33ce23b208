//! Strategy trait shared by all bandit algorithms

use std::fmt;

use rand::RngCore;

use crate::error::Result;

/// Trait for bandit decision strategies.
///
/// A strategy owns its per-arm belief state. The runner calls
/// [`initialize`](Strategy::initialize) once per run and then alternates
/// [`select_arm`](Strategy::select_arm) and [`update`](Strategy::update)
/// exactly once per trial.
pub trait Strategy: fmt::Display + Send {
    /// Strategy name
    fn name(&self) -> &str;

    /// Allocate fresh belief state for `true_means.len()` arms
    fn initialize(&mut self, true_means: &[f64]) -> Result<()>;

    /// Number of arms the belief state is sized for, 0 before `initialize`
    fn arm_count(&self) -> usize;

    /// Choose an arm for trial `t`. Randomness comes only from `rng`.
    fn select_arm(&self, t: usize, rng: &mut dyn RngCore) -> Result<usize>;

    /// Fold the observed reward into the belief for `arm`
    fn update(&mut self, arm: usize, reward: f64) -> Result<()>;

    /// Hyperparameters as JSON
    fn params(&self) -> serde_json::Value;
}

/// `"<name> Bandit with <n> arms"`
pub(crate) fn describe(strategy: &dyn Strategy, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
        f,
        "{} Bandit with {} arms",
        strategy.name(),
        strategy.arm_count()
    )
}
