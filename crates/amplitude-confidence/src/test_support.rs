//! Fixtures shared by the unit tests

use crate::FitContext;
use amplitude_core::{EvaluationSchedule, LikelihoodKernel, OutcomeDistribution, PhaseEstimationKernel};
use amplitude_mle::{GridEstimator, LikelihoodMaximizer};

/// A fitted distribution that owns its data
pub(crate) struct Fixture {
    pub schedule: EvaluationSchedule,
    pub dist: OutcomeDistribution,
    pub grid: f64,
    pub mle: f64,
}

impl Fixture {
    pub fn new(dist: OutcomeDistribution, m: u32) -> Self {
        let schedule = EvaluationSchedule::new(m).unwrap();
        let grid = GridEstimator.estimate_grid(&dist, &schedule).unwrap();
        let mle = LikelihoodMaximizer::default()
            .maximize(&dist, &PhaseEstimationKernel, &schedule, grid)
            .unwrap();
        Self { schedule, dist, grid, mle }
    }

    /// Exact kernel probabilities of `a` backed by `shots` trials
    pub fn exact(a: f64, m: u32, shots: u64) -> Self {
        let schedule = EvaluationSchedule::new(m).unwrap();
        let dist = OutcomeDistribution::exact(PhaseEstimationKernel.probabilities(a, &schedule))
            .unwrap()
            .with_shots(shots)
            .unwrap();
        Self::new(dist, m)
    }

    pub fn counts(counts: Vec<u64>, m: u32) -> Self {
        Self::new(OutcomeDistribution::from_counts(counts).unwrap(), m)
    }

    pub fn fit(&self) -> FitContext<'_, PhaseEstimationKernel> {
        FitContext::around_grid(self.mle, self.grid, &self.dist, &PhaseEstimationKernel, &self.schedule)
            .unwrap()
    }
}

/// Kernel whose outcome probabilities do not depend on the amplitude
pub(crate) struct FlatKernel;

impl LikelihoodKernel for FlatKernel {
    fn probability(&self, _y: usize, _amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        1.0 / schedule.grid_size() as f64
    }
}
