//! Confidence intervals for maximum-likelihood amplitude estimates
//!
//! Three interchangeable methods, selected by [`IntervalMethod`]:
//!
//! - **Fisher**: Wald interval from the kernel's expected Fisher information
//! - **Observed Fisher**: Wald interval from the curvature of the realized
//!   log-likelihood
//! - **Likelihood ratio**: amplitudes not rejected by the likelihood-ratio test
//!   against the χ²₁ quantile
//!
//! For many trials all three converge to the same interval.
//!
//! # Example
//!
//! ```rust
//! use amplitude_core::{EvaluationSchedule, OutcomeDistribution, PhaseEstimationKernel};
//! use amplitude_confidence::{ConfidenceIntervalEngine, FitContext, IntervalMethod};
//! use amplitude_mle::{GridEstimator, LikelihoodMaximizer};
//!
//! let schedule = EvaluationSchedule::new(2).unwrap();
//! let dist = OutcomeDistribution::from_counts(vec![1000, 0, 0, 0]).unwrap();
//! let kernel = PhaseEstimationKernel;
//!
//! let grid = GridEstimator.estimate_grid(&dist, &schedule).unwrap();
//! let mle = LikelihoodMaximizer::default().maximize(&dist, &kernel, &schedule, grid).unwrap();
//! let fit = FitContext::around_grid(mle, grid, &dist, &kernel, &schedule).unwrap();
//!
//! let engine = ConfidenceIntervalEngine::default();
//! for method in IntervalMethod::ALL {
//!     let ci = engine.confidence_interval(&fit, 0.05, method).unwrap();
//!     assert_eq!(ci.lower, 0.0);
//! }
//! ```

pub mod api;
mod asymptotic;
pub mod critical;
mod context;
mod fisher;
mod likelihood_ratio;
mod observed_fisher;
mod traits;
mod types;

#[cfg(test)]
mod test_support;

pub use api::{confidence_interval, ConfidenceIntervalEngine, DEFAULT_ALPHA};
pub use context::FitContext;
pub use fisher::FisherCI;
pub use likelihood_ratio::LikelihoodRatioCI;
pub use observed_fisher::ObservedFisherCI;
pub use traits::IntervalEstimator;
pub use types::{ConfidenceInterval, IntervalMethod};
