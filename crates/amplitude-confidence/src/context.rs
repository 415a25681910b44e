//! Inputs shared by every interval method

use amplitude_core::{
    EvaluationSchedule, Error, LikelihoodKernel, OutcomeDistribution, Result,
};
use amplitude_mle::{LogLikelihood, PrimaryInterval};

/// A fitted estimate together with the data and model it was fitted on.
///
/// Interval methods only read from the context, so one context can serve any
/// number of interval requests.
pub struct FitContext<'a, K: ?Sized> {
    /// Maximum-likelihood estimate of the amplitude
    pub mle: f64,
    /// Alias-free neighbourhood the MLE was searched in
    pub primary: PrimaryInterval,
    pub distribution: &'a OutcomeDistribution,
    pub kernel: &'a K,
    pub schedule: &'a EvaluationSchedule,
}

impl<'a, K> FitContext<'a, K>
where
    K: LikelihoodKernel + ?Sized,
{
    pub fn new(
        mle: f64,
        primary: PrimaryInterval,
        distribution: &'a OutcomeDistribution,
        kernel: &'a K,
        schedule: &'a EvaluationSchedule,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&mle) {
            return Err(Error::invalid_amplitude(mle));
        }
        distribution.validate_for(schedule)?;
        if distribution.is_degenerate() {
            return Err(Error::DegenerateLikelihood(
                "distribution assigns no mass to any grid index".to_string(),
            ));
        }

        Ok(Self {
            mle,
            primary,
            distribution,
            kernel,
            schedule,
        })
    }

    /// Context whose primary interval is the one around `grid_value`
    pub fn around_grid(
        mle: f64,
        grid_value: f64,
        distribution: &'a OutcomeDistribution,
        kernel: &'a K,
        schedule: &'a EvaluationSchedule,
    ) -> Result<Self> {
        let primary = PrimaryInterval::around(grid_value, schedule)?;
        Self::new(mle, primary, distribution, kernel, schedule)
    }

    /// Number of trials behind the distribution, as a float
    pub fn shots(&self) -> f64 {
        self.distribution.shots() as f64
    }

    pub fn log_likelihood(&self, floor: f64) -> LogLikelihood<'a, K> {
        LogLikelihood::new(self.distribution, self.kernel, self.schedule).with_floor(floor)
    }
}
