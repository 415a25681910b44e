//! Core trait for confidence interval estimation

use crate::context::FitContext;
use crate::types::{ConfidenceInterval, IntervalMethod};
use amplitude_core::{LikelihoodKernel, Result};

/// Confidence interval estimator for a fitted amplitude
///
/// The kernel is passed through the [`FitContext`] rather than stored, so one
/// estimator serves any kernel and any number of fits.
pub trait IntervalEstimator {
    /// Which method this estimator implements
    fn method(&self) -> IntervalMethod;

    /// Interval with confidence `1 - alpha` around `fit.mle`
    fn confidence_interval<K>(&self, fit: &FitContext<'_, K>, alpha: f64) -> Result<ConfidenceInterval>
    where
        K: LikelihoodKernel + ?Sized;
}
