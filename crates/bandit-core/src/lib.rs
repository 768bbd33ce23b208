//! Bandit Lab core - multi-armed bandit strategies and regret accounting
//!
//! This crate holds the decision algorithms (decaying epsilon-greedy and
//! Gaussian Thompson sampling), the trial loop that drives them against a
//! fixed set of arms, and the metrics derived from the resulting trial log.
//! It performs no I/O and no logging; reporting is left to [`Reporter`]
//! implementations supplied by the caller.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod arm;
pub mod comparison;
pub mod config;
pub mod epsilon_greedy;
pub mod error;
pub mod experiment;
pub mod metrics;
pub mod report;
pub mod strategy;
pub mod thompson;

pub use arm::{Arm, ArmModel, GaussianNoise};
pub use comparison::{compare, derive_seed, Comparison};
pub use config::{ExperimentConfig, StrategyConfig};
pub use epsilon_greedy::EpsilonGreedy;
pub use error::{BanditError, Result};
pub use experiment::{run, Experiment, ExperimentResult, TrialRecord};
pub use metrics::{summarize, summarize_prefix, Summary};
pub use report::Reporter;
pub use strategy::Strategy;
pub use thompson::ThompsonSampling;
