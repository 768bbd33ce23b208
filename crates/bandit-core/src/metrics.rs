//! Reward and regret accounting over a finished run

use serde::{Deserialize, Serialize};

use crate::arm::argmax;
use crate::error::{BanditError, Result};
use crate::experiment::{ExperimentResult, TrialRecord};

/// Aggregate statistics of a run (or of a prefix of it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub strategy: String,
    pub n_trials: usize,
    pub total_reward: f64,
    pub optimal_reward: f64,
    pub total_regret: f64,
    pub average_reward: f64,
    pub average_regret_per_trial: f64,
    pub optimal_arm: usize,
    /// Regret measured on true means instead of sampled rewards
    pub pseudo_regret: f64,
}

/// Summarize the full trial log
pub fn summarize(result: &ExperimentResult) -> Summary {
    summary_of(result, result.records())
}

/// Summarize the first `len` trials
pub fn summarize_prefix(result: &ExperimentResult, len: usize) -> Result<Summary> {
    if len == 0 || len > result.n_trials() {
        return Err(BanditError::config(format!(
            "prefix length must be in 1..={}, got {len}",
            result.n_trials()
        )));
    }
    Ok(summary_of(result, &result.records()[..len]))
}

fn summary_of(result: &ExperimentResult, records: &[TrialRecord]) -> Summary {
    let n = records.len() as f64;
    let best_mean = optimal_mean(result);

    let total_reward = records.iter().map(|r| r.reward).sum::<f64>();
    let optimal_reward = best_mean * n;
    let total_regret = optimal_reward - total_reward;
    let pseudo_regret = records
        .iter()
        .map(|r| best_mean - result.true_means()[r.chosen_arm])
        .sum::<f64>();

    Summary {
        strategy: result.strategy().to_string(),
        n_trials: records.len(),
        total_reward,
        optimal_reward,
        total_regret,
        average_reward: total_reward / n,
        average_regret_per_trial: total_regret / n,
        optimal_arm: optimal_arm(result),
        pseudo_regret,
    }
}

pub fn total_reward(result: &ExperimentResult) -> f64 {
    result.records().iter().map(|r| r.reward).sum()
}

/// Reward of always pulling the best arm in expectation
pub fn optimal_reward(result: &ExperimentResult) -> f64 {
    optimal_mean(result) * result.n_trials() as f64
}

pub fn total_regret(result: &ExperimentResult) -> f64 {
    optimal_reward(result) - total_reward(result)
}

pub fn average_reward(result: &ExperimentResult) -> f64 {
    total_reward(result) / result.n_trials() as f64
}

pub fn average_regret_per_trial(result: &ExperimentResult) -> f64 {
    total_regret(result) / result.n_trials() as f64
}

/// Index of the arm with the highest true mean, lowest index on ties
pub fn optimal_arm(result: &ExperimentResult) -> usize {
    argmax(result.true_means().iter().copied())
}

fn optimal_mean(result: &ExperimentResult) -> f64 {
    result.true_means()[optimal_arm(result)]
}

/// Running sum of rewards
pub fn cumulative_rewards(result: &ExperimentResult) -> Vec<f64> {
    result
        .records()
        .iter()
        .scan(0.0, |acc, r| {
            *acc += r.reward;
            Some(*acc)
        })
        .collect()
}

/// Running sum of `max(true_means) - reward`
pub fn cumulative_regret(result: &ExperimentResult) -> Vec<f64> {
    let best_mean = optimal_mean(result);
    result
        .records()
        .iter()
        .scan(0.0, |acc, r| {
            *acc += best_mean - r.reward;
            Some(*acc)
        })
        .collect()
}

/// Average reward over each prefix of the run
pub fn running_average_reward(result: &ExperimentResult) -> Vec<f64> {
    cumulative_rewards(result)
        .into_iter()
        .enumerate()
        .map(|(t, total)| total / (t + 1) as f64)
        .collect()
}

/// How often each arm was chosen
pub fn arm_pull_counts(result: &ExperimentResult) -> Vec<usize> {
    let mut counts = vec![0; result.n_arms()];
    for record in result.records() {
        counts[record.chosen_arm] += 1;
    }
    counts
}
