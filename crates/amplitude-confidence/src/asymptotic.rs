//! Normal-approximation intervals from Fisher information

use crate::critical::normal_quantile;
use crate::types::{ConfidenceInterval, IntervalMethod};
use amplitude_core::Result;

/// Wald interval `estimate ± z / sqrt(shots · information)` clamped to `[0, 1]`
///
/// `information` is the per-trial Fisher information in amplitude units and
/// must be positive. Infinite information gives a zero-width interval.
pub(crate) fn wald_interval(
    estimate: f64,
    information: f64,
    shots: f64,
    alpha: f64,
    method: IntervalMethod,
) -> Result<ConfidenceInterval> {
    let z = normal_quantile(alpha)?;
    let half_width = if information.is_infinite() {
        0.0
    } else {
        z / (shots * information).sqrt()
    };

    let raw_lower = estimate - half_width;
    let raw_upper = estimate + half_width;
    let clamped = raw_lower < 0.0 || raw_upper > 1.0;

    Ok(
        ConfidenceInterval::new(raw_lower.max(0.0), raw_upper.min(1.0), estimate, alpha, method)
            .with_boundary_clamped(clamped),
    )
}
