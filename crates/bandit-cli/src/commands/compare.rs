//! Side-by-side comparison of every configured strategy

use std::path::Path;

use anyhow::{Context, Result};
use bandit_core::{derive_seed, report, Comparison, Experiment, ExperimentResult, Strategy};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::ExperimentArgs;
use crate::report::from_output;

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

pub async fn run(args: CompareArgs, config_path: Option<&Path>) -> Result<()> {
    let settings = super::resolve(args.experiment, config_path)?;
    settings
        .experiment
        .validate()
        .context("Invalid experiment configuration")?;

    let experiment = settings.experiment.experiment()?;
    let strategies = settings.experiment.build_strategies()?;
    let seed = super::resolve_seed(&settings);

    let comparison = run_concurrently(&experiment, strategies, seed).await?;

    let mut reporters = from_output(&settings.output);
    for result in comparison.results() {
        report::report_all(&mut reporters, result)?;
    }

    let best = comparison.best();
    info!(
        "Lowest total regret: {} ({:.2} over {} trials)",
        best.strategy, best.total_regret, best.n_trials
    );
    Ok(())
}

/// Run each strategy on its own blocking task.
///
/// Run `i` uses `derive_seed(seed, i)`, so the outcome matches
/// `bandit_core::compare` with the same seed.
async fn run_concurrently(
    experiment: &Experiment,
    strategies: Vec<Box<dyn Strategy>>,
    seed: u64,
) -> Result<Comparison> {
    let handles: Vec<_> = strategies
        .into_iter()
        .enumerate()
        .map(|(i, mut strategy)| {
            let experiment = experiment.clone();
            tokio::task::spawn_blocking(move || {
                info!(
                    "Starting experiment for {} with {} trials.",
                    strategy.name(),
                    experiment.n_trials()
                );
                let mut rng = StdRng::seed_from_u64(derive_seed(seed, i));
                let result = experiment.run(strategy.as_mut(), &mut rng);
                info!("Finished experiment for {}.", strategy.name());
                result.with_context(|| format!("{} run failed", strategy.name()))
            })
        })
        .collect();

    let mut results: Vec<ExperimentResult> = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("Experiment task panicked")??);
    }

    Ok(Comparison::from_results(results)?)
}
