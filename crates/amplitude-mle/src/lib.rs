//! Grid and maximum-likelihood amplitude estimation
//!
//! This crate turns an observed outcome distribution into amplitude estimates:
//!
//! - **[`GridEstimator`]**: the amplitude of the most probable grid cell
//! - **[`LikelihoodMaximizer`]**: refines the grid estimate by maximizing the
//!   log-likelihood over the [`PrimaryInterval`] of that cell
//!
//! # Example
//!
//! ```rust
//! use amplitude_core::{EvaluationSchedule, LikelihoodKernel, OutcomeDistribution, PhaseEstimationKernel};
//! use amplitude_mle::{GridEstimator, LikelihoodMaximizer};
//!
//! let schedule = EvaluationSchedule::new(4).unwrap();
//! let kernel = PhaseEstimationKernel;
//! let dist = OutcomeDistribution::exact(kernel.probabilities(0.4, &schedule)).unwrap();
//!
//! let grid = GridEstimator.estimate_grid(&dist, &schedule).unwrap();
//! let mle = LikelihoodMaximizer::default()
//!     .maximize(&dist, &kernel, &schedule, grid)
//!     .unwrap();
//!
//! assert!((grid - 0.30866).abs() < 1e-5);
//! assert!((mle - 0.4).abs() < 1e-5);
//! ```

mod grid;
mod interval;
mod likelihood;
mod maximizer;

pub use grid::{GridEstimate, GridEstimator};
pub use interval::PrimaryInterval;
pub use likelihood::LogLikelihood;
pub use maximizer::LikelihoodMaximizer;
