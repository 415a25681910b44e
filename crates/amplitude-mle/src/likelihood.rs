//! Log-likelihood of observed outcomes under a kernel

use amplitude_core::math::angle::angle_to_amplitude;
use amplitude_core::{EvaluationSchedule, LikelihoodKernel, OutcomeDistribution};

/// Log-likelihood `ℓ(a) = Σ_y n_y · log Pr[Y = y | a]` of a distribution
///
/// Only outcomes with positive mass contribute. Kernel probabilities are
/// clamped below by `floor` so that outcomes the kernel rules out give a large
/// finite penalty rather than `-∞`.
pub struct LogLikelihood<'a, K: ?Sized> {
    observed: Vec<(usize, f64)>,
    shots: f64,
    kernel: &'a K,
    schedule: &'a EvaluationSchedule,
    floor: f64,
}

impl<'a, K> LogLikelihood<'a, K>
where
    K: LikelihoodKernel + ?Sized,
{
    pub fn new(
        distribution: &OutcomeDistribution,
        kernel: &'a K,
        schedule: &'a EvaluationSchedule,
    ) -> Self {
        Self {
            observed: distribution.observed().collect(),
            shots: distribution.shots() as f64,
            kernel,
            schedule,
            floor: f64::MIN_POSITIVE,
        }
    }

    /// Set the lower clamp on kernel probabilities
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Number of trials behind the distribution
    pub fn shots(&self) -> f64 {
        self.shots
    }

    /// Log-likelihood of one trial, `Σ_y f_y · log Pr[Y = y | a]` with normalized frequencies
    ///
    /// Has the same maximiser as [`LogLikelihood::total`] and is what the
    /// optimizer works with, independent of the number of trials.
    pub fn per_trial(&self, amplitude: f64) -> f64 {
        self.observed
            .iter()
            .map(|&(y, f)| {
                let p = self.kernel.probability(y, amplitude, self.schedule);
                f * p.max(self.floor).ln()
            })
            .sum()
    }

    /// Per-trial log-likelihood as a function of the angle `ω`, `a = sin²(πω)`
    pub fn per_trial_at_angle(&self, omega: f64) -> f64 {
        self.per_trial(angle_to_amplitude(omega))
    }

    /// Log-likelihood of all `shots` trials
    pub fn total(&self, amplitude: f64) -> f64 {
        self.shots * self.per_trial(amplitude)
    }
}
