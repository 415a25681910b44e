//! Critical values of the normal and chi-squared distributions

use amplitude_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};

pub(crate) fn check_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::invalid_alpha(alpha));
    }
    Ok(())
}

/// Two-sided normal quantile `z = Φ⁻¹(1 - alpha/2)`
pub fn normal_quantile(alpha: f64) -> Result<f64> {
    check_alpha(alpha)?;
    let normal = Normal::new(0.0, 1.0).map_err(|e| {
        Error::Computation(format!("Failed to create normal distribution: {}", e))
    })?;
    Ok(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// `(1 - alpha)` quantile of the chi-squared distribution with one degree of freedom
///
/// A χ²₁ variable is the square of a standard normal, so the quantile is `z²`
/// with `z` the two-sided normal quantile.
pub fn chi_squared_threshold(alpha: f64) -> Result<f64> {
    let z = normal_quantile(alpha)?;
    Ok(z * z)
}
