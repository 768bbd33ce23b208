//! Reporter seam for consumers of finished runs

use anyhow::Result;

use crate::experiment::ExperimentResult;
use crate::metrics::{self, Summary};

/// Observer invoked by the caller after a run completes.
///
/// Implementations do the persistence, logging or plotting; the core never
/// calls a reporter on its own.
pub trait Reporter {
    /// Reporter name
    fn name(&self) -> &str;

    /// Consume one finished run and its summary
    fn report(&mut self, result: &ExperimentResult, summary: &Summary) -> Result<()>;
}

/// Summarize `result` once and hand it to every reporter in order
pub fn report_all(
    reporters: &mut [Box<dyn Reporter>],
    result: &ExperimentResult,
) -> Result<Summary> {
    let summary = metrics::summarize(result);
    for reporter in reporters.iter_mut() {
        reporter.report(result, &summary)?;
    }
    Ok(summary)
}
