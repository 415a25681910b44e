//! Intervals from the observed Fisher information of the realized data

use crate::asymptotic::wald_interval;
use crate::context::FitContext;
use crate::critical::check_alpha;
use crate::traits::IntervalEstimator;
use crate::types::{ConfidenceInterval, IntervalMethod};
use amplitude_core::math::angle::{amplitude_curvature, amplitude_jacobian, amplitude_to_angle};
use amplitude_core::math::derivatives::{
    first_derivative, one_sided_second_derivative, second_derivative,
};
use amplitude_core::{Error, LikelihoodKernel, Result, SolverConfig};
use tracing::debug;

/// Wald interval from the observed Fisher information `-ℓ''(â) / shots`
///
/// The curvature is taken by central differences in the angle coordinate,
/// with step `curvature_step / M`, and converted to amplitude units. At
/// `a = 0` or `a = 1` it is a one-sided amplitude difference, so a boundary
/// estimate still gets a finite interval. A curvature that is not strictly
/// positive fails with [`Error::NonPositiveCurvature`]; retrying with a larger
/// [`ObservedFisherCI::with_curvature_step`] often helps on noisy counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservedFisherCI {
    config: SolverConfig,
}

impl ObservedFisherCI {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn with_curvature_step(mut self, curvature_step: f64) -> Self {
        self.config.curvature_step = curvature_step;
        self
    }

    /// Observed per-trial Fisher information `-ℓ''(â) / shots`, in amplitude units
    ///
    /// Within two amplitude steps of 0 or 1 the curvature is a one-sided
    /// difference in amplitude. Elsewhere it is differenced in angle and
    /// mapped back with the chain rule, keeping the first-derivative term so
    /// the result holds at non-stationary estimates too.
    pub fn observed_information<K>(&self, fit: &FitContext<'_, K>) -> Result<f64>
    where
        K: LikelihoodKernel + ?Sized,
    {
        let loglik = fit.log_likelihood(self.config.probability_floor);
        let grid_size = fit.schedule.grid_size();
        let angle_step = self.config.angle_step(grid_size);
        let amplitude_step = angle_step / grid_size as f64;

        let curvature = if fit.mle < 2.0 * amplitude_step || fit.mle > 1.0 - 2.0 * amplitude_step {
            let h = if fit.mle < 0.5 { amplitude_step } else { -amplitude_step };
            let curvature = -one_sided_second_derivative(|a| loglik.per_trial(a), fit.mle, h);
            debug!("Observed curvature {:.6e} at boundary a = {:.8} (step {:.3e})", curvature, fit.mle, h);
            curvature
        } else {
            let omega = amplitude_to_angle(fit.mle);
            let at_angle = |w: f64| loglik.per_trial_at_angle(w);
            let slope = first_derivative(at_angle, omega, angle_step);
            let bend = second_derivative(at_angle, omega, angle_step);
            let jacobian = amplitude_jacobian(omega);
            let curvature =
                -(bend - slope * amplitude_curvature(omega) / jacobian) / (jacobian * jacobian);
            debug!(
                "Observed curvature {:.6e} at ω = {:.8} (slope {:.3e}, step {:.3e})",
                curvature, omega, slope, angle_step
            );
            curvature
        };

        if !(curvature.is_finite() && curvature > 0.0) {
            return Err(Error::NonPositiveCurvature {
                curvature,
                step: self.config.curvature_step,
            });
        }
        Ok(curvature)
    }
}

impl IntervalEstimator for ObservedFisherCI {
    fn method(&self) -> IntervalMethod {
        IntervalMethod::ObservedFisher
    }

    fn confidence_interval<K>(&self, fit: &FitContext<'_, K>, alpha: f64) -> Result<ConfidenceInterval>
    where
        K: LikelihoodKernel + ?Sized,
    {
        check_alpha(alpha)?;
        let information = self.observed_information(fit)?;
        wald_interval(fit.mle, information, fit.shots(), alpha, IntervalMethod::ObservedFisher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, FlatKernel};
    use crate::FisherCI;
    use amplitude_core::{EvaluationSchedule, OutcomeDistribution, PhaseEstimationKernel};
    use approx::assert_relative_eq;

    #[test]
    fn test_matches_expected_information_on_exact_data() {
        // At the true amplitude the observed and expected curvature coincide
        for &(a, m) in &[(0.3, 3), (0.2, 4), (0.82, 5)] {
            let fixture = Fixture::exact(a, m, 1_000_000);
            let observed = ObservedFisherCI::default()
                .observed_information(&fixture.fit())
                .unwrap();
            let expected = PhaseEstimationKernel.fisher_information(fixture.mle, &fixture.schedule);
            assert_relative_eq!(observed, expected, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_agrees_with_fisher_interval() {
        let fixture = Fixture::exact(0.3, 3, 1_000_000);
        let fit = fixture.fit();
        let observed = ObservedFisherCI::default().confidence_interval(&fit, 0.05).unwrap();
        let expected = FisherCI.confidence_interval(&fit, 0.05).unwrap();
        assert_relative_eq!(observed.width(), expected.width(), max_relative = 1e-3);
        assert_eq!(observed.estimate, expected.estimate);
        assert_eq!(observed.method, IntervalMethod::ObservedFisher);
    }

    #[test]
    fn test_boundary_estimate_has_finite_width() {
        // ℓ(a) = 1000·log p₀(a) has slope -5000 at a = 0 and curvature ≈ -9000
        let fixture = Fixture::counts(vec![1000, 0, 0, 0], 2);
        assert_eq!(fixture.mle, 0.0);
        let fit = fixture.fit();

        let info = ObservedFisherCI::default().observed_information(&fit).unwrap();
        assert_relative_eq!(info, 9.0, max_relative = 1e-3);

        let ci = ObservedFisherCI::default().confidence_interval(&fit, 0.05).unwrap();
        assert_eq!(ci.lower, 0.0);
        assert_relative_eq!(ci.upper, 0.02066, max_relative = 2e-3);
        assert!(ci.boundary_clamped);
    }

    #[test]
    fn test_upper_boundary_mirrors_lower() {
        let fixture = Fixture::counts(vec![0, 0, 1000, 0], 2);
        assert_eq!(fixture.mle, 1.0);
        let ci = ObservedFisherCI::default().confidence_interval(&fixture.fit(), 0.05).unwrap();
        assert_eq!(ci.upper, 1.0);
        assert_relative_eq!(1.0 - ci.lower, 0.02066, max_relative = 2e-3);
        assert!(ci.boundary_clamped);
    }

    #[test]
    fn test_curvature_in_amplitude_units_away_from_maximum() {
        // a = 0.25 is not the maximum of exact a = 0.3 data, so the
        // first-derivative term of the chain rule matters
        let fixture = Fixture::exact(0.3, 3, 1);
        let fit = FitContext::around_grid(0.25, fixture.grid, &fixture.dist, &PhaseEstimationKernel, &fixture.schedule)
            .unwrap();
        let loglik = fit.log_likelihood(SolverConfig::default().probability_floor);
        let h = 1e-5;
        let direct = -second_derivative(|a| loglik.per_trial(a), 0.25, h);

        let info = ObservedFisherCI::default().observed_information(&fit).unwrap();
        assert_relative_eq!(info, direct, max_relative = 1e-4);
        assert_relative_eq!(info, 142.32, max_relative = 1e-3);
    }

    #[test]
    fn test_flat_likelihood_fails() {
        let schedule = EvaluationSchedule::new(2).unwrap();
        let dist = OutcomeDistribution::from_counts(vec![5, 5, 5, 5]).unwrap();
        let fit = FitContext::around_grid(0.3, 0.5, &dist, &FlatKernel, &schedule).unwrap();
        let err = ObservedFisherCI::default().confidence_interval(&fit, 0.05).unwrap_err();
        match err {
            Error::NonPositiveCurvature { curvature, step } => {
                assert_eq!(curvature, 0.0);
                assert_eq!(step, SolverConfig::default().curvature_step);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_step_does_not_move_interval_much() {
        let fixture = Fixture::exact(0.2, 4, 10_000);
        let fit = fixture.fit();
        let fine = ObservedFisherCI::default().confidence_interval(&fit, 0.05).unwrap();
        let coarse = ObservedFisherCI::default()
            .with_curvature_step(1e-2)
            .confidence_interval(&fit, 0.05)
            .unwrap();
        assert_relative_eq!(fine.width(), coarse.width(), max_relative = 1e-2);
    }
}
