//! Intervals from the expected Fisher information of the kernel

use crate::asymptotic::wald_interval;
use crate::context::FitContext;
use crate::critical::check_alpha;
use crate::traits::IntervalEstimator;
use crate::types::{ConfidenceInterval, IntervalMethod};
use amplitude_core::{Error, LikelihoodKernel, Result};
use tracing::debug;

/// Wald interval from the expected Fisher information `I(â)` of the kernel
///
/// Uses [`LikelihoodKernel::fisher_information`], the closed form where the
/// kernel provides one. The data enters only through the MLE and the number
/// of trials.
#[derive(Debug, Clone, Copy, Default)]
pub struct FisherCI;

impl FisherCI {
    pub fn new() -> Self {
        Self
    }
}

impl IntervalEstimator for FisherCI {
    fn method(&self) -> IntervalMethod {
        IntervalMethod::Fisher
    }

    fn confidence_interval<K>(&self, fit: &FitContext<'_, K>, alpha: f64) -> Result<ConfidenceInterval>
    where
        K: LikelihoodKernel + ?Sized,
    {
        check_alpha(alpha)?;
        let information = fit.kernel.fisher_information(fit.mle, fit.schedule);
        debug!("Expected Fisher information {:.6e} at a = {:.8}", information, fit.mle);

        if information.is_nan() || information <= 0.0 {
            return Err(Error::NonPositiveCurvature {
                curvature: information,
                step: 0.0,
            });
        }
        wald_interval(fit.mle, information, fit.shots(), alpha, IntervalMethod::Fisher)
    }
}
