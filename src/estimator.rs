//! The estimation pipeline: grid estimate, MLE and confidence intervals

use crate::report::EstimationReport;
use amplitude_confidence::{ConfidenceInterval, ConfidenceIntervalEngine, FitContext, IntervalMethod};
use amplitude_core::{
    EvaluationSchedule, Experiment, LikelihoodKernel, OutcomeDistribution, PhaseEstimationKernel,
    Result, SolverConfig,
};
use amplitude_mle::{GridEstimator, LikelihoodMaximizer, PrimaryInterval};
use serde::Serialize;
use tracing::{debug, instrument};

/// Grid and maximum-likelihood estimates from one distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Amplitude of the most probable grid cell
    pub grid_value: f64,
    /// Maximum-likelihood amplitude within the primary interval
    pub mle_value: f64,
    /// Folded index of the most probable grid cell
    pub grid_index: usize,
    pub schedule: EvaluationSchedule,
    /// Neighbourhood of the grid value the MLE was searched in
    pub primary: PrimaryInterval,
}

/// Runs the full estimation pipeline against one likelihood kernel.
///
/// The kernel is only read, so one estimator can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct AmplitudeEstimator<K = PhaseEstimationKernel> {
    kernel: K,
    maximizer: LikelihoodMaximizer,
    engine: ConfidenceIntervalEngine,
}

impl Default for AmplitudeEstimator<PhaseEstimationKernel> {
    fn default() -> Self {
        Self::new(PhaseEstimationKernel)
    }
}

impl<K: LikelihoodKernel> AmplitudeEstimator<K> {
    /// Estimator with default solver settings
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            maximizer: LikelihoodMaximizer::default(),
            engine: ConfidenceIntervalEngine::default(),
        }
    }

    pub fn with_config(kernel: K, config: SolverConfig) -> Result<Self> {
        Ok(Self {
            kernel,
            maximizer: LikelihoodMaximizer::new(config)?,
            engine: ConfidenceIntervalEngine::new(config)?,
        })
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn config(&self) -> &SolverConfig {
        self.maximizer.config()
    }

    /// Grid estimate followed by likelihood maximization around it
    #[instrument(skip(self, distribution, schedule), fields(schedule = %schedule, shots = distribution.shots()))]
    pub fn estimate(&self, distribution: &OutcomeDistribution, schedule: &EvaluationSchedule) -> Result<Estimate> {
        let grid = GridEstimator.estimate(distribution, schedule)?;
        let primary = PrimaryInterval::around(grid.amplitude, schedule)?;
        let mle_value = self
            .maximizer
            .maximize_within(distribution, &self.kernel, schedule, &primary)?;
        debug!("Grid estimate {:.8}, MLE {:.8}", grid.amplitude, mle_value);

        Ok(Estimate {
            grid_value: grid.amplitude,
            mle_value,
            grid_index: grid.folded_index,
            schedule: *schedule,
            primary,
        })
    }

    /// Interval with confidence `1 - alpha` around an existing estimate
    ///
    /// The MLE is taken from `estimate` and never recomputed.
    pub fn confidence_interval(
        &self,
        estimate: &Estimate,
        distribution: &OutcomeDistribution,
        alpha: f64,
        method: IntervalMethod,
    ) -> Result<ConfidenceInterval> {
        let fit = FitContext::new(
            estimate.mle_value,
            estimate.primary,
            distribution,
            &self.kernel,
            &estimate.schedule,
        )?;
        self.engine.confidence_interval(&fit, alpha, method)
    }

    /// Estimate a distribution and wrap the result in a report
    pub fn report(&self, distribution: OutcomeDistribution, schedule: &EvaluationSchedule) -> Result<EstimationReport<'_, K>> {
        let estimate = self.estimate(&distribution, schedule)?;
        Ok(EstimationReport::new(self, distribution, estimate))
    }

    /// Run an experiment and estimate its outcome
    pub fn run<E>(&self, experiment: &E, schedule: &EvaluationSchedule) -> Result<EstimationReport<'_, K>>
    where
        E: Experiment + ?Sized,
    {
        let distribution = experiment.run(schedule)?;
        self.report(distribution, schedule)
    }
}
