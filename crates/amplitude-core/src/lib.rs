//! Core types for amplitude estimation
//!
//! This crate provides the building blocks shared by the estimation and
//! confidence-interval crates:
//!
//! - [`EvaluationSchedule`]: evaluation depth `m` and the grid of `M = 2^m` cells
//! - [`OutcomeDistribution`]: exact probabilities or sampled counts over the grid
//! - [`LikelihoodKernel`]: the probability law `Pr[Y = y | a]`, with the canonical
//!   [`PhaseEstimationKernel`]
//! - [`Experiment`]: the collaborator that produces distributions
//! - [`math`]: angle reparameterisation, finite differences and bounded searches
//! - [`SolverConfig`]: tolerances and iteration caps
//!
//! # Example
//!
//! ```rust
//! use amplitude_core::{EvaluationSchedule, LikelihoodKernel, PhaseEstimationKernel};
//!
//! let schedule = EvaluationSchedule::new(3).unwrap();
//! let probabilities = PhaseEstimationKernel.probabilities(0.3, &schedule);
//! assert_eq!(probabilities.len(), 8);
//! assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod experiment;
pub mod kernel;
pub mod math;
pub mod schedule;

pub use config::SolverConfig;
pub use distribution::{OutcomeDistribution, SamplingMode, NORMALIZATION_TOLERANCE};
pub use error::{Error, Result};
pub use experiment::Experiment;
pub use kernel::{LikelihoodKernel, PhaseEstimationKernel};
pub use schedule::EvaluationSchedule;
