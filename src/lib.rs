//! Maximum-likelihood amplitude estimation
//!
//! An unknown amplitude `a ∈ [0, 1]` is observed through outcomes on a grid of
//! `M = 2^m` cells. This crate turns those outcomes into:
//!
//! - a **grid estimate**, the amplitude of the most probable cell
//! - a **maximum-likelihood estimate** refined within that cell's neighbourhood
//! - **confidence intervals** by expected Fisher information, observed Fisher
//!   information or likelihood-ratio inversion
//!
//! The building blocks live in the member crates and are re-exported here.
//!
//! # Example
//!
//! ```rust
//! use amplitude_stats::{AmplitudeEstimator, EvaluationSchedule, IntervalMethod, OutcomeDistribution};
//!
//! let schedule = EvaluationSchedule::new(2).unwrap();
//! let counts = OutcomeDistribution::from_counts(vec![1000, 0, 0, 0]).unwrap();
//!
//! let estimator = AmplitudeEstimator::default();
//! let mut report = estimator.report(counts, &schedule).unwrap();
//! assert_eq!(report.mle_value(), 0.0);
//!
//! let ci = report.request(0.05, IntervalMethod::LikelihoodRatio).unwrap();
//! assert_eq!(ci.lower, 0.0);
//! ```

pub mod estimator;
pub mod report;
#[cfg(feature = "simulation")]
pub mod simulation;

pub use amplitude_confidence::{
    ConfidenceInterval, ConfidenceIntervalEngine, FisherCI, FitContext, IntervalEstimator,
    IntervalMethod, LikelihoodRatioCI, ObservedFisherCI, DEFAULT_ALPHA,
};
pub use amplitude_core::{
    EvaluationSchedule, Error, Experiment, LikelihoodKernel, OutcomeDistribution,
    PhaseEstimationKernel, Result, SamplingMode, SolverConfig,
};
pub use amplitude_mle::{GridEstimate, GridEstimator, LikelihoodMaximizer, PrimaryInterval};
pub use estimator::{AmplitudeEstimator, Estimate};
pub use report::EstimationReport;
#[cfg(feature = "simulation")]
pub use simulation::{ExactSimulator, SamplingSimulator};
