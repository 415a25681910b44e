//! Error types for amplitude estimation
//!
//! Provides a unified error type for all amplitude-stats crates.

use thiserror::Error;

/// Core error type for amplitude estimation
#[derive(Error, Debug)]
pub enum Error {
    /// Outcome distribution is empty, malformed or not normalized
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// The observed data carries no mass, so the likelihood is flat
    #[error("Degenerate likelihood: {0}")]
    DegenerateLikelihood(String),

    /// Estimated curvature of the log-likelihood was not positive
    #[error("Non-positive curvature {curvature:e} (finite-difference step {step:e})")]
    NonPositiveCurvature { curvature: f64, step: f64 },

    /// Bisection could not find a sign change on the bracket
    #[error("Root not bracketed on [{lower}, {upper}]")]
    RootNotBracketed { lower: f64, upper: f64 },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Failure reported by an external collaborator
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a significance level outside (0, 1)
    pub fn invalid_alpha(alpha: f64) -> Self {
        Self::InvalidParameter(format!("alpha {alpha} must be in (0, 1)"))
    }

    /// Create an error for an amplitude outside [0, 1]
    pub fn invalid_amplitude(amplitude: f64) -> Self {
        Self::InvalidParameter(format!("amplitude {amplitude} must be in [0, 1]"))
    }

    /// Create an error for a distribution defined over the wrong grid
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::InvalidDistribution(format!(
            "expected {expected} grid cells, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidDistribution(format!("{context} contains NaN or infinite values"))
    }

    /// Whether the caller can recover by retrying with other settings
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NonPositiveCurvature { .. } | Self::RootNotBracketed { .. }
        )
    }
}
