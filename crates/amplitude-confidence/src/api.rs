//! Method dispatch for confidence intervals
//!
//! [`ConfidenceIntervalEngine`] maps an [`IntervalMethod`] onto the estimator
//! that implements it, so callers pick a method by value rather than by type.

use crate::context::FitContext;
use crate::fisher::FisherCI;
use crate::likelihood_ratio::LikelihoodRatioCI;
use crate::observed_fisher::ObservedFisherCI;
use crate::traits::IntervalEstimator;
use crate::types::{ConfidenceInterval, IntervalMethod};
use amplitude_core::{LikelihoodKernel, Result, SolverConfig};

/// Default significance level, a 95% interval
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Computes intervals by any of the three methods with shared solver settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceIntervalEngine {
    config: SolverConfig,
}

impl ConfidenceIntervalEngine {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Interval with confidence `1 - alpha` by `method`
    pub fn confidence_interval<K>(
        &self,
        fit: &FitContext<'_, K>,
        alpha: f64,
        method: IntervalMethod,
    ) -> Result<ConfidenceInterval>
    where
        K: LikelihoodKernel + ?Sized,
    {
        match method {
            IntervalMethod::Fisher => FisherCI.confidence_interval(fit, alpha),
            IntervalMethod::ObservedFisher => {
                ObservedFisherCI::new(self.config).confidence_interval(fit, alpha)
            }
            IntervalMethod::LikelihoodRatio => {
                LikelihoodRatioCI::new(self.config).confidence_interval(fit, alpha)
            }
        }
    }

    /// Intervals by every method, in [`IntervalMethod::ALL`] order
    pub fn all_intervals<K>(&self, fit: &FitContext<'_, K>, alpha: f64) -> Result<Vec<ConfidenceInterval>>
    where
        K: LikelihoodKernel + ?Sized,
    {
        IntervalMethod::ALL
            .iter()
            .map(|&method| self.confidence_interval(fit, alpha, method))
            .collect()
    }
}

/// Interval by `method` with default solver settings
pub fn confidence_interval<K>(
    fit: &FitContext<'_, K>,
    alpha: f64,
    method: IntervalMethod,
) -> Result<ConfidenceInterval>
where
    K: LikelihoodKernel + ?Sized,
{
    ConfidenceIntervalEngine::default().confidence_interval(fit, alpha, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[test]
    fn test_dispatch_tags_method() {
        let fixture = Fixture::exact(0.4, 4, 1000);
        let fit = fixture.fit();
        for method in IntervalMethod::ALL {
            let ci = confidence_interval(&fit, DEFAULT_ALPHA, method).unwrap();
            assert_eq!(ci.method, method);
            assert!(ci.lower <= ci.estimate && ci.estimate <= ci.upper);
        }
    }

    #[test]
    fn test_all_intervals() {
        let fixture = Fixture::exact(0.4, 4, 1000);
        let intervals = ConfidenceIntervalEngine::default()
            .all_intervals(&fixture.fit(), 0.1)
            .unwrap();
        let methods: Vec<_> = intervals.iter().map(|ci| ci.method).collect();
        assert_eq!(methods, IntervalMethod::ALL.to_vec());
        assert!(intervals.iter().all(|ci| ci.alpha == 0.1));
    }

    #[test]
    fn test_idempotent() {
        let fixture = Fixture::counts(vec![2, 3, 32, 10, 2, 1, 0, 0, 0, 0, 0, 1, 2, 10, 33, 4], 4);
        let fit = fixture.fit();
        let engine = ConfidenceIntervalEngine::default();
        for method in IntervalMethod::ALL {
            let first = engine.confidence_interval(&fit, 0.05, method).unwrap();
            let second = engine.confidence_interval(&fit, 0.05, method).unwrap();
            assert_eq!(first.lower.to_bits(), second.lower.to_bits());
            assert_eq!(first.upper.to_bits(), second.upper.to_bits());
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(ConfidenceIntervalEngine::new(SolverConfig::default().scan_points(0)).is_err());
    }
}
