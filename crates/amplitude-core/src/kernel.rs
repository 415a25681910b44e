//! Likelihood kernels linking the hidden amplitude to grid outcomes
//!
//! A kernel supplies `Pr[Y = y | a]` for every grid index of a schedule. Kernels
//! must be periodic and symmetric (`Pr[Y = y | a] = Pr[Y = M - y | a]`) and
//! stateless, so a single kernel can be shared by concurrent estimation runs.

use crate::math::angle::{amplitude_to_angle, angle_to_amplitude, to_amplitude_information};
use crate::math::derivatives::second_derivative;
use crate::EvaluationSchedule;
use std::f64::consts::PI;
use std::sync::Arc;

/// Kernel probabilities below this are treated as exact zeros
const ZERO_PROBABILITY: f64 = 1e-24;

/// `|M·ε|` below which the Fejér kernel uses its Taylor expansion around a peak
const PEAK_TAYLOR_RADIUS: f64 = 1e-3;

/// Finite-difference step of the default Fisher information, in grid cells
const DEFAULT_CURVATURE_STEP: f64 = 1e-3;

/// Probability law `Pr[Y = y | a]` over the grid of an [`EvaluationSchedule`]
pub trait LikelihoodKernel: Send + Sync {
    /// Probability of grid index `y` when the hidden amplitude is `amplitude`
    fn probability(&self, y: usize, amplitude: f64, schedule: &EvaluationSchedule) -> f64;

    /// Probabilities of every grid index
    fn probabilities(&self, amplitude: f64, schedule: &EvaluationSchedule) -> Vec<f64> {
        (0..schedule.grid_size())
            .map(|y| self.probability(y, amplitude, schedule))
            .collect()
    }

    /// Expected Fisher information of one trial, in amplitude units
    ///
    /// The default is the curvature of the kernel's own cross-entropy in angle
    /// space, obtained by central differences. Outcomes with zero probability
    /// at `amplitude` drop out of that sum, so kernels whose zeros matter
    /// (such as [`PhaseEstimationKernel`] on grid points) should override this
    /// with a closed form.
    fn fisher_information(&self, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        let omega = amplitude_to_angle(amplitude);
        let weights = self.probabilities(amplitude, schedule);
        let step = DEFAULT_CURVATURE_STEP / schedule.grid_size() as f64;

        let cross_entropy = |w: f64| {
            let a = angle_to_amplitude(w);
            weights
                .iter()
                .enumerate()
                .filter(|&(_, &p)| p > 0.0)
                .map(|(y, &p)| p * self.probability(y, a, schedule).max(f64::MIN_POSITIVE).ln())
                .sum::<f64>()
        };

        let information = -second_derivative(cross_entropy, omega, step);
        to_amplitude_information(information, omega)
    }
}

impl<K: LikelihoodKernel + ?Sized> LikelihoodKernel for &K {
    fn probability(&self, y: usize, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        (**self).probability(y, amplitude, schedule)
    }

    fn probabilities(&self, amplitude: f64, schedule: &EvaluationSchedule) -> Vec<f64> {
        (**self).probabilities(amplitude, schedule)
    }

    fn fisher_information(&self, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        (**self).fisher_information(amplitude, schedule)
    }
}

impl<K: LikelihoodKernel + ?Sized> LikelihoodKernel for Arc<K> {
    fn probability(&self, y: usize, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        (**self).probability(y, amplitude, schedule)
    }

    fn probabilities(&self, amplitude: f64, schedule: &EvaluationSchedule) -> Vec<f64> {
        (**self).probabilities(amplitude, schedule)
    }

    fn fisher_information(&self, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        (**self).fisher_information(amplitude, schedule)
    }
}

impl<K: LikelihoodKernel + ?Sized> LikelihoodKernel for Box<K> {
    fn probability(&self, y: usize, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        (**self).probability(y, amplitude, schedule)
    }

    fn probabilities(&self, amplitude: f64, schedule: &EvaluationSchedule) -> Vec<f64> {
        (**self).probabilities(amplitude, schedule)
    }

    fn fisher_information(&self, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        (**self).fisher_information(amplitude, schedule)
    }
}

/// Canonical phase-estimation kernel
///
/// With `ω = arcsin(√a)/π` and the Fejér kernel
/// `F(d) = sin²(Mπd) / (M² sin²(πd))`,
///
/// ```text
/// Pr[Y = y | a] = ½ [F(y/M - ω) + F(y/M + ω)]
/// ```
///
/// The Fisher information has a closed form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseEstimationKernel;

impl PhaseEstimationKernel {
    pub fn new() -> Self {
        Self
    }
}

/// Signed distance from `d` to the nearest integer
#[inline]
fn peak_offset(d: f64) -> f64 {
    d - d.round()
}

/// Fejér kernel `F(d)`
fn fejer(d: f64, m: f64) -> f64 {
    let eps = peak_offset(d);
    if (m * eps).abs() < PEAK_TAYLOR_RADIUS {
        return 1.0 - (m * m - 1.0) * PI * PI * eps * eps / 3.0;
    }
    let num = (m * PI * d).sin();
    let den = m * (PI * d).sin();
    (num * num) / (den * den)
}

/// Derivative `F'(d)`
fn fejer_slope(d: f64, m: f64) -> f64 {
    let eps = peak_offset(d);
    if (m * eps).abs() < PEAK_TAYLOR_RADIUS {
        return -2.0 * (m * m - 1.0) * PI * PI * eps / 3.0;
    }
    let s = (PI * d).sin();
    let sm = (m * PI * d).sin();
    let s2 = s * s;
    PI * (m * (2.0 * m * PI * d).sin() * s2 - sm * sm * (2.0 * PI * d).sin())
        / (m * m * s2 * s2)
}

/// Coefficient `c` of `F(d₀ + ε) ≈ c·ε²` at a zero `d₀` of the Fejér kernel
fn fejer_zero_curvature(d: f64) -> f64 {
    let s = (PI * d).sin();
    PI * PI / (s * s)
}

impl LikelihoodKernel for PhaseEstimationKernel {
    fn probability(&self, y: usize, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        let m = schedule.grid_size() as f64;
        let x = schedule.fold(y) as f64 / m;
        let omega = amplitude_to_angle(amplitude);
        (0.5 * (fejer(x - omega, m) + fejer(x + omega, m))).clamp(0.0, 1.0)
    }

    fn fisher_information(&self, amplitude: f64, schedule: &EvaluationSchedule) -> f64 {
        let m = schedule.grid_size() as f64;
        let omega = amplitude_to_angle(amplitude);

        let information: f64 = (0..schedule.grid_size())
            .map(|y| {
                let x = schedule.fold(y) as f64 / m;
                let (d1, d2) = (x - omega, x + omega);
                let p = 0.5 * (fejer(d1, m) + fejer(d2, m));
                if p > ZERO_PROBABILITY {
                    let dp = 0.5 * (fejer_slope(d2, m) - fejer_slope(d1, m));
                    dp * dp / p
                } else {
                    // Both Fejér terms sit on zeros; use the limit of (p')²/p
                    2.0 * (fejer_zero_curvature(d1) + fejer_zero_curvature(d2))
                }
            })
            .sum();

        to_amplitude_information(information, omega)
    }
}
