//! Experiment-execution collaborator

use crate::{EvaluationSchedule, OutcomeDistribution, Result};

/// Produces a completed outcome distribution for a schedule
///
/// Implementations own any retrying or batching against the device or
/// simulator; the estimation pipeline treats `run` as an already-resolved input.
pub trait Experiment {
    fn run(&self, schedule: &EvaluationSchedule) -> Result<OutcomeDistribution>;
}

impl<F> Experiment for F
where
    F: Fn(&EvaluationSchedule) -> Result<OutcomeDistribution>,
{
    fn run(&self, schedule: &EvaluationSchedule) -> Result<OutcomeDistribution> {
        self(schedule)
    }
}
