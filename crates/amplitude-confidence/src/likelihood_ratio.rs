//! Intervals by inverting the likelihood-ratio test

use crate::context::FitContext;
use crate::critical::chi_squared_threshold;
use crate::traits::IntervalEstimator;
use crate::types::{ConfidenceInterval, IntervalMethod};
use amplitude_core::math::search::bisect;
use amplitude_core::{Error, LikelihoodKernel, Result, SolverConfig};
use tracing::debug;

/// Set of amplitudes whose likelihood-ratio statistic
/// `Λ(a) = 2·(ℓ(â) - ℓ(a))` stays below the χ²₁ quantile.
///
/// The bounds are roots of `Λ(a) - χ²₁` found by bisection on
/// `[primary.lower, â]` and `[â, primary.upper]`, where the likelihood is
/// unimodal. A side on which `Λ` never reaches the threshold is clamped to
/// 0 or 1 and the interval is flagged as `boundary_clamped`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikelihoodRatioCI {
    config: SolverConfig,
}

impl LikelihoodRatioCI {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    fn solve<F>(&self, excess: F, from: f64, to: f64, boundary: f64) -> Result<(f64, bool)>
    where
        F: Fn(f64) -> f64,
    {
        match bisect(excess, from, to, self.config.tolerance, self.config.max_iterations) {
            Ok(root) => Ok((root, false)),
            Err(Error::RootNotBracketed { lower, upper }) => {
                debug!(
                    "Likelihood ratio stays below threshold on [{:.6}, {:.6}], clamping to {}",
                    lower, upper, boundary
                );
                Ok((boundary, true))
            }
            Err(e) => Err(e),
        }
    }
}

impl IntervalEstimator for LikelihoodRatioCI {
    fn method(&self) -> IntervalMethod {
        IntervalMethod::LikelihoodRatio
    }

    fn confidence_interval<K>(&self, fit: &FitContext<'_, K>, alpha: f64) -> Result<ConfidenceInterval>
    where
        K: LikelihoodKernel + ?Sized,
    {
        let threshold = chi_squared_threshold(alpha)?;
        let loglik = fit.log_likelihood(self.config.probability_floor);
        let shots = fit.shots();
        let peak = loglik.per_trial(fit.mle);
        let excess = |a: f64| 2.0 * shots * (peak - loglik.per_trial(a)) - threshold;

        let (lower, lower_clamped) = if fit.primary.lower < fit.mle {
            self.solve(&excess, fit.primary.lower, fit.mle, 0.0)?
        } else {
            (fit.mle, false)
        };
        let (upper, upper_clamped) = if fit.primary.upper > fit.mle {
            self.solve(&excess, fit.mle, fit.primary.upper, 1.0)?
        } else {
            (fit.mle, false)
        };
        debug!("Likelihood-ratio bounds [{:.8}, {:.8}] at threshold {:.4}", lower, upper, threshold);

        Ok(
            ConfidenceInterval::new(lower, upper, fit.mle, alpha, IntervalMethod::LikelihoodRatio)
                .with_boundary_clamped(lower_clamped || upper_clamped),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, FlatKernel};
    use crate::ObservedFisherCI;
    use amplitude_core::{EvaluationSchedule, OutcomeDistribution};
    use approx::assert_relative_eq;

    #[test]
    fn test_statistic_hits_threshold_at_bounds() {
        let fixture = Fixture::exact(0.3, 3, 10_000);
        let fit = fixture.fit();
        let ci = LikelihoodRatioCI::default().confidence_interval(&fit, 0.05).unwrap();

        let loglik = fit.log_likelihood(SolverConfig::default().probability_floor);
        let statistic = |a: f64| 2.0 * 10_000.0 * (loglik.per_trial(fit.mle) - loglik.per_trial(a));
        let threshold = chi_squared_threshold(0.05).unwrap();
        assert_relative_eq!(statistic(ci.lower), threshold, max_relative = 1e-6);
        assert_relative_eq!(statistic(ci.upper), threshold, max_relative = 1e-6);
        assert!(ci.lower < ci.estimate && ci.estimate < ci.upper);
        assert!(!ci.boundary_clamped);
    }

    #[test]
    fn test_agrees_with_observed_fisher_for_many_shots() {
        let fixture = Fixture::exact(0.3, 3, 1_000_000);
        let fit = fixture.fit();
        let lr = LikelihoodRatioCI::default().confidence_interval(&fit, 0.05).unwrap();
        let observed = ObservedFisherCI::default().confidence_interval(&fit, 0.05).unwrap();
        assert_relative_eq!(lr.width(), observed.width(), max_relative = 1e-2);
        assert_relative_eq!(lr.center(), observed.center(), max_relative = 1e-3);
    }

    #[test]
    fn test_boundary_mle() {
        let fixture = Fixture::counts(vec![1000, 0, 0, 0], 2);
        let ci = LikelihoodRatioCI::default().confidence_interval(&fixture.fit(), 0.05).unwrap();
        assert_eq!(ci.lower, 0.0);
        assert_eq!(ci.estimate, 0.0);
        assert!(ci.upper > 0.0 && ci.upper < fixture.fit().primary.upper);
        assert!(!ci.boundary_clamped);
    }

    #[test]
    fn test_flat_likelihood_clamps_both_sides() {
        let schedule = EvaluationSchedule::new(2).unwrap();
        let dist = OutcomeDistribution::from_counts(vec![5, 5, 5, 5]).unwrap();
        let fit = FitContext::around_grid(0.3, 0.5, &dist, &FlatKernel, &schedule).unwrap();
        let ci = LikelihoodRatioCI::default().confidence_interval(&fit, 0.05).unwrap();
        assert_eq!((ci.lower, ci.upper), (0.0, 1.0));
        assert!(ci.boundary_clamped);
        assert!(ci.touches_boundary());
    }

    #[test]
    fn test_invalid_alpha() {
        let fixture = Fixture::exact(0.3, 3, 100);
        assert!(LikelihoodRatioCI::default().confidence_interval(&fixture.fit(), 0.0).is_err());
    }
}
