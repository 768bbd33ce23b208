//! Reporters: summary logging, CSV trial logs and curve series

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bandit_core::metrics;
use bandit_core::{ExperimentResult, Reporter, Summary};
use serde::Serialize;
use tracing::info;

use crate::settings::OutputConfig;

/// Build the reporters enabled by the output settings. Logging is always on.
pub fn from_output(output: &OutputConfig) -> Vec<Box<dyn Reporter>> {
    let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(LogReporter)];
    if output.csv {
        reporters.push(Box::new(CsvReporter::new(&output.data_dir)));
    }
    if output.series {
        reporters.push(Box::new(SeriesReporter::new(&output.data_dir)));
    }
    reporters
}

/// Logs the run summary
pub struct LogReporter;

impl Reporter for LogReporter {
    fn name(&self) -> &str {
        "log"
    }

    fn report(&mut self, _result: &ExperimentResult, summary: &Summary) -> Result<()> {
        info!("=== {} Summary ===", summary.strategy);
        info!("Total Trials: {}", summary.n_trials);
        info!("Average Reward: {:.4}", summary.average_reward);
        info!(
            "Average Regret per Trial: {:.4}",
            summary.average_regret_per_trial
        );
        info!("Total Regret: {:.2}", summary.total_regret);
        info!("Optimal Bandit (True Mean): {}", summary.optimal_arm);
        Ok(())
    }
}

/// Writes `<dir>/<strategy>_results.csv` with one row per trial
pub struct CsvReporter {
    dir: PathBuf,
}

impl CsvReporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, strategy: &str) -> PathBuf {
        self.dir.join(format!("{strategy}_results.csv"))
    }
}

impl Reporter for CsvReporter {
    fn name(&self) -> &str {
        "csv"
    }

    fn report(&mut self, result: &ExperimentResult, _summary: &Summary) -> Result<()> {
        ensure_dir(&self.dir)?;
        let path = self.path_for(result.strategy());
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let mut out = BufWriter::new(file);
        writeln!(out, "Bandit,Reward,Algorithm")?;
        for record in result.records() {
            writeln!(
                out,
                "{},{},{}",
                record.chosen_arm,
                record.reward,
                result.strategy()
            )?;
        }
        out.flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Results saved to {}", path.display());
        Ok(())
    }
}

/// Curves an external plotting tool needs for the reward/regret charts
#[derive(Debug, Serialize)]
struct Series<'a> {
    strategy: &'a str,
    true_means: &'a [f64],
    cumulative_rewards: Vec<f64>,
    cumulative_regret: Vec<f64>,
    running_average_reward: Vec<f64>,
    arm_pull_counts: Vec<usize>,
    summary: &'a Summary,
}

/// Writes `<dir>/<strategy>_series.json`
pub struct SeriesReporter {
    dir: PathBuf,
}

impl SeriesReporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, strategy: &str) -> PathBuf {
        self.dir.join(format!("{strategy}_series.json"))
    }
}

impl Reporter for SeriesReporter {
    fn name(&self) -> &str {
        "series"
    }

    fn report(&mut self, result: &ExperimentResult, summary: &Summary) -> Result<()> {
        ensure_dir(&self.dir)?;
        let path = self.path_for(result.strategy());

        let series = Series {
            strategy: result.strategy(),
            true_means: result.true_means(),
            cumulative_rewards: metrics::cumulative_rewards(result),
            cumulative_regret: metrics::cumulative_regret(result),
            running_average_reward: metrics::running_average_reward(result),
            arm_pull_counts: metrics::arm_pull_counts(result),
            summary,
        };

        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer(&mut out, &series)?;
        out.flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Series saved to {}", path.display());
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandit_core::{run, EpsilonGreedy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn result() -> ExperimentResult {
        let mut eg = EpsilonGreedy::default();
        run(&mut eg, &[1.0, 2.0], 25, &mut StdRng::seed_from_u64(4)).unwrap()
    }

    #[test]
    fn test_from_output() {
        let mut output = OutputConfig::default();
        let names: Vec<String> = from_output(&output)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["log", "csv"]);

        output.csv = false;
        output.series = true;
        let names: Vec<String> = from_output(&output)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["log", "series"]);
    }

    #[test]
    fn test_csv_reporter_writes_one_row_per_trial() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let result = result();
        let summary = metrics::summarize(&result);

        let mut reporter = CsvReporter::new(&data_dir);
        reporter.report(&result, &summary).unwrap();

        let content = fs::read_to_string(data_dir.join("Epsilon-Greedy_results.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Bandit,Reward,Algorithm");
        assert_eq!(lines.len(), 26);

        let first: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(first[0], result.records()[0].chosen_arm.to_string());
        assert_eq!(first[1].parse::<f64>().unwrap(), result.records()[0].reward);
        assert_eq!(first[2], "Epsilon-Greedy");
    }

    #[test]
    fn test_series_reporter_writes_curves() {
        let dir = tempfile::tempdir().unwrap();
        let result = result();
        let summary = metrics::summarize(&result);

        let mut reporter = SeriesReporter::new(dir.path());
        reporter.report(&result, &summary).unwrap();

        let path = reporter.path_for("Epsilon-Greedy");
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["strategy"], "Epsilon-Greedy");
        assert_eq!(json["cumulative_rewards"].as_array().unwrap().len(), 25);
        assert_eq!(json["cumulative_regret"].as_array().unwrap().len(), 25);
        assert_eq!(json["arm_pull_counts"].as_array().unwrap().len(), 2);
        assert_eq!(json["summary"]["n_trials"], 25);
    }

    #[test]
    fn test_log_reporter() {
        let result = result();
        let summary = metrics::summarize(&result);
        assert!(LogReporter.report(&result, &summary).is_ok());
    }
}
