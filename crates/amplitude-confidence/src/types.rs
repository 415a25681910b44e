//! Common types for confidence intervals

use serde::{Deserialize, Serialize};
use std::fmt;

/// Method used to construct a confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalMethod {
    /// Expected (analytic) Fisher information of the kernel at the MLE
    Fisher,
    /// Observed Fisher information, the curvature of the realized log-likelihood
    ObservedFisher,
    /// Inversion of the likelihood-ratio test against a chi-squared threshold
    LikelihoodRatio,
}

impl IntervalMethod {
    /// Every method, in a fixed order
    pub const ALL: [IntervalMethod; 3] = [
        IntervalMethod::Fisher,
        IntervalMethod::ObservedFisher,
        IntervalMethod::LikelihoodRatio,
    ];

    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fisher => "fisher",
            Self::ObservedFisher => "observed_fisher",
            Self::LikelihoodRatio => "likelihood_ratio",
        }
    }
}

impl fmt::Display for IntervalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A confidence interval for an amplitude, `0 ≤ lower ≤ estimate ≤ upper ≤ 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The maximum-likelihood estimate the interval was built around
    pub estimate: f64,
    /// Significance level, the interval has confidence `1 - alpha`
    pub alpha: f64,
    pub method: IntervalMethod,
    /// A bound was clamped to 0 or 1 rather than found by the method
    pub boundary_clamped: bool,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, estimate: f64, alpha: f64, method: IntervalMethod) -> Self {
        Self {
            lower,
            upper,
            estimate,
            alpha,
            method,
            boundary_clamped: false,
        }
    }

    pub fn with_boundary_clamped(mut self, clamped: bool) -> Self {
        self.boundary_clamped = clamped;
        self
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the confidence interval
    pub fn center(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Confidence level `1 - alpha`
    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Whether either bound lies on 0 or 1
    pub fn touches_boundary(&self) -> bool {
        self.lower <= 0.0 || self.upper >= 1.0
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI ({}): [{:.5}, {:.5}], estimate: {:.5}",
            self.confidence_level() * 100.0,
            self.method,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval() {
        let ci = ConfidenceInterval::new(0.2, 0.3, 0.25, 0.05, IntervalMethod::Fisher);

        assert!((ci.width() - 0.1).abs() < 1e-12);
        assert!((ci.center() - 0.25).abs() < 1e-12);
        assert!((ci.confidence_level() - 0.95).abs() < 1e-12);
        assert!(ci.contains(0.25));
        assert!(!ci.contains(0.1));
        assert!(!ci.touches_boundary());
        assert!(!ci.boundary_clamped);
    }

    #[test]
    fn test_boundary() {
        let ci = ConfidenceInterval::new(0.0, 0.01, 0.0, 0.05, IntervalMethod::LikelihoodRatio)
            .with_boundary_clamped(true);
        assert!(ci.touches_boundary());
        assert!(ci.boundary_clamped);
    }

    #[test]
    fn test_display() {
        let ci = ConfidenceInterval::new(0.19447, 0.19985, 0.19716, 0.05, IntervalMethod::ObservedFisher);
        let display = format!("{}", ci);
        assert!(display.contains("95.0%"));
        assert!(display.contains("observed_fisher"));
        assert!(display.contains("0.19447"));
        assert!(display.contains("0.19985"));
    }

    #[test]
    fn test_method_names() {
        let names: Vec<_> = IntervalMethod::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["fisher", "observed_fisher", "likelihood_ratio"]);
        assert_eq!(IntervalMethod::LikelihoodRatio.to_string(), "likelihood_ratio");
    }
}
