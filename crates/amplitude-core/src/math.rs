//! Numerical utilities for likelihood-based amplitude estimation
//!
//! This module provides the small set of one-dimensional numerical tools the
//! estimation pipeline is built on: the amplitude/angle reparameterisation,
//! central finite differences, and bounded searches for maxima and roots.
//! Every iterative routine is capped by an explicit iteration count.

/// Mapping between amplitudes `a ∈ [0, 1]` and angles `ω ∈ [0, 1/2]`, `a = sin²(πω)`
pub mod angle {
    use std::f64::consts::PI;

    /// Angle `ω = arcsin(√a)/π` of an amplitude; inputs are clamped to `[0, 1]`
    #[inline]
    pub fn amplitude_to_angle(amplitude: f64) -> f64 {
        amplitude.clamp(0.0, 1.0).sqrt().asin() / PI
    }

    /// Amplitude `sin²(πω)` of an angle
    ///
    /// Defined for every real `ω`; the map is even about `0` and `1/2`.
    #[inline]
    pub fn angle_to_amplitude(omega: f64) -> f64 {
        let s = (PI * omega).sin();
        s * s
    }

    /// Derivative `da/dω = π·sin(2πω)`
    #[inline]
    pub fn amplitude_jacobian(omega: f64) -> f64 {
        PI * (2.0 * PI * omega).sin()
    }

    /// Second derivative `d²a/dω² = 2π²·cos(2πω)`
    #[inline]
    pub fn amplitude_curvature(omega: f64) -> f64 {
        2.0 * PI * PI * (2.0 * PI * omega).cos()
    }

    /// `|da/dω|` below which the Jacobian is treated as zero
    const JACOBIAN_FLOOR: f64 = 1e-12;

    /// Convert Fisher information from angle units to amplitude units
    ///
    /// `I_a = I_ω / (da/dω)²`. Positive information becomes infinite where the
    /// Jacobian vanishes, at `a = 0` and `a = 1`.
    pub fn to_amplitude_information(information: f64, omega: f64) -> f64 {
        let jacobian = amplitude_jacobian(omega);
        if jacobian.abs() < JACOBIAN_FLOOR {
            return if information > 0.0 { f64::INFINITY } else { information };
        }
        information / (jacobian * jacobian)
    }

}

/// Central finite differences
pub mod derivatives {
    /// First derivative `(f(x+h) - f(x-h)) / 2h`
    #[inline]
    pub fn first_derivative<F>(f: F, x: f64, h: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        (f(x + h) - f(x - h)) / (2.0 * h)
    }

    /// Second derivative `(f(x+h) - 2f(x) + f(x-h)) / h²`
    #[inline]
    pub fn second_derivative<F>(f: F, x: f64, h: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        (f(x + h) - 2.0 * f(x) + f(x - h)) / (h * h)
    }

    /// One-sided second derivative `(f(x) - 2f(x+h) + f(x+2h)) / h²`
    ///
    /// A negative `h` differences backwards.
    #[inline]
    pub fn one_sided_second_derivative<F>(f: F, x: f64, h: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        (f(x) - 2.0 * f(x + h) + f(x + 2.0 * h)) / (h * h)
    }

}

/// Bounded one-dimensional searches
pub mod search {
    use crate::{Error, Result};
    use tracing::debug;

    /// Inverse golden ratio `(√5 - 1) / 2`
    const INV_PHI: f64 = 0.618_033_988_749_894_9;

    /// Location and value of a maximum
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Maximum {
        pub argmax: f64,
        pub value: f64,
    }

    impl Maximum {
        fn better(self, other: Maximum) -> Maximum {
            if other.value > self.value {
                other
            } else {
                self
            }
        }
    }

    /// Golden-section search for the maximum of a unimodal function on `[lower, upper]`
    ///
    /// The returned maximum is the best of the final bracket midpoint and the
    /// two bracket ends, so a maximum sitting on a boundary is returned exactly.
    pub fn golden_section_max<F>(
        f: F,
        lower: f64,
        upper: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Maximum
    where
        F: Fn(f64) -> f64,
    {
        let endpoints = Maximum { argmax: lower, value: f(lower) }
            .better(Maximum { argmax: upper, value: f(upper) });

        let (mut a, mut b) = (lower, upper);
        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let mut fc = f(c);
        let mut fd = f(d);

        let mut iterations = 0;
        while (b - a) > tolerance && iterations < max_iterations {
            if fc >= fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = f(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = f(d);
            }
            iterations += 1;
        }

        if (b - a) > tolerance {
            debug!(
                "Golden-section search stopped after {} iterations with bracket width {:.3e}",
                iterations,
                b - a
            );
        }

        let mid = 0.5 * (a + b);
        endpoints.better(Maximum { argmax: mid, value: f(mid) })
    }

    /// Evenly spaced scan of `[lower, upper]` followed by golden-section refinement
    /// around the best scanned point
    ///
    /// The scan makes the search robust to mild multimodality inside the bracket.
    pub fn scan_and_refine<F>(
        f: F,
        lower: f64,
        upper: f64,
        scan_points: usize,
        tolerance: f64,
        max_iterations: usize,
    ) -> Maximum
    where
        F: Fn(f64) -> f64,
    {
        let steps = scan_points.max(2);
        let spacing = (upper - lower) / steps as f64;
        let point = |i: usize| if i == steps { upper } else { lower + spacing * i as f64 };

        let mut best_index = 0;
        let mut best = Maximum { argmax: lower, value: f(lower) };
        for i in 1..=steps {
            let x = point(i);
            let candidate = Maximum { argmax: x, value: f(x) };
            if candidate.value > best.value {
                best = candidate;
                best_index = i;
            }
        }

        let a = point(best_index.saturating_sub(1));
        let b = point((best_index + 1).min(steps));
        best.better(golden_section_max(&f, a, b, tolerance, max_iterations))
    }

    /// Bisection for a root of `f` on `[lower, upper]`
    ///
    /// Fails with [`Error::RootNotBracketed`] when `f` has the same strict sign
    /// at both ends.
    pub fn bisect<F>(
        f: F,
        lower: f64,
        upper: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<f64>
    where
        F: Fn(f64) -> f64,
    {
        let (mut a, mut b) = (lower, upper);
        let mut fa = f(a);
        let fb = f(b);

        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa.signum() == fb.signum() || fa.is_nan() || fb.is_nan() {
            return Err(Error::RootNotBracketed { lower, upper });
        }

        let mut iterations = 0;
        while (b - a).abs() > tolerance && iterations < max_iterations {
            let mid = 0.5 * (a + b);
            let fm = f(mid);
            if fm == 0.0 {
                return Ok(mid);
            }
            if fm.signum() == fa.signum() {
                a = mid;
                fa = fm;
            } else {
                b = mid;
            }
            iterations += 1;
        }

        if (b - a).abs() > tolerance {
            debug!(
                "Bisection stopped after {} iterations with bracket [{:.6e}, {:.6e}]",
                iterations, a, b
            );
        }
        Ok(0.5 * (a + b))
    }

}
