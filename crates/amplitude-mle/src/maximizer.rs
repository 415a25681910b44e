//! Maximum-likelihood refinement of the grid estimate

use crate::{LogLikelihood, PrimaryInterval};
use amplitude_core::math::search::{scan_and_refine, Maximum};
use amplitude_core::{
    EvaluationSchedule, Error, LikelihoodKernel, OutcomeDistribution, Result, SolverConfig,
};
use tracing::{debug, instrument};

/// Maximizes the log-likelihood of observed outcomes over the primary interval
/// of a grid estimate.
///
/// Each segment of the [`PrimaryInterval`] is scanned on an even grid and the
/// best scan point is refined by golden-section search; the grid value itself
/// is kept as a candidate. Maxima on `a = 0` or `a = 1` are returned exactly.
///
/// Exact-probability distributions are optimized through their per-trial
/// log-likelihood, which has the same maximiser as the count-scaled one.
#[derive(Debug, Clone, Default)]
pub struct LikelihoodMaximizer {
    config: SolverConfig,
}

impl LikelihoodMaximizer {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// MLE restricted to the primary interval around `grid_value`
    #[instrument(skip(self, distribution, kernel), fields(shots = distribution.shots()))]
    pub fn maximize<K>(
        &self,
        distribution: &OutcomeDistribution,
        kernel: &K,
        schedule: &EvaluationSchedule,
        grid_value: f64,
    ) -> Result<f64>
    where
        K: LikelihoodKernel + ?Sized,
    {
        let interval = PrimaryInterval::around(grid_value, schedule)?;
        self.maximize_within(distribution, kernel, schedule, &interval)
    }

    /// MLE restricted to an explicit primary interval
    pub fn maximize_within<K>(
        &self,
        distribution: &OutcomeDistribution,
        kernel: &K,
        schedule: &EvaluationSchedule,
        interval: &PrimaryInterval,
    ) -> Result<f64>
    where
        K: LikelihoodKernel + ?Sized,
    {
        distribution.validate_for(schedule)?;
        if distribution.is_degenerate() {
            return Err(Error::DegenerateLikelihood(
                "distribution assigns no mass to any grid index".to_string(),
            ));
        }

        let loglik = LogLikelihood::new(distribution, kernel, schedule)
            .with_floor(self.config.probability_floor);
        let objective = |a: f64| loglik.per_trial(a);

        debug!(
            "Searching [{:.6}, {:.6}] around grid value {:.6}",
            interval.lower, interval.upper, interval.center
        );

        let mut best = Maximum {
            argmax: interval.center,
            value: objective(interval.center),
        };
        for (lower, upper) in interval.segments() {
            let candidate = scan_and_refine(
                &objective,
                lower,
                upper,
                self.config.scan_points,
                self.config.tolerance,
                self.config.max_iterations,
            );
            debug!(
                "Segment [{:.6}, {:.6}]: local maximum {:.8} (log-likelihood {:.6})",
                lower, upper, candidate.argmax, candidate.value
            );
            if candidate.value > best.value {
                best = candidate;
            }
        }

        let mle = best.argmax.clamp(0.0, 1.0);
        debug!("MLE {:.8}", mle);
        Ok(mle)
    }
}
