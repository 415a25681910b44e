//! Solver settings shared by the maximizer and the interval methods

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings for the iterative numerical routines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Coarse scan points per primary-interval segment
    pub scan_points: usize,
    /// Amplitude tolerance of golden-section search and bisection
    pub tolerance: f64,
    /// Iteration cap for every iterative search
    pub max_iterations: usize,
    /// Finite-difference step as a fraction of one grid cell in angle units
    pub curvature_step: f64,
    /// Lower clamp applied to kernel probabilities before taking logarithms
    pub probability_floor: f64,
}

impl SolverConfig {
    /// Loosest tolerance that still resolves amplitudes to 1e-5
    pub const MAX_TOLERANCE: f64 = 1e-5;

    pub fn scan_points(mut self, scan_points: usize) -> Self {
        self.scan_points = scan_points;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the curvature step. Larger steps smooth out noisy likelihoods.
    pub fn curvature_step(mut self, curvature_step: f64) -> Self {
        self.curvature_step = curvature_step;
        self
    }

    pub fn probability_floor(mut self, probability_floor: f64) -> Self {
        self.probability_floor = probability_floor;
        self
    }

    /// Finite-difference step in angle units for a grid of `grid_size` cells
    pub fn angle_step(&self, grid_size: usize) -> f64 {
        self.curvature_step / grid_size as f64
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        if self.scan_points < 2 {
            return Err(Error::InvalidParameter(format!(
                "scan_points {} must be at least 2",
                self.scan_points
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance <= Self::MAX_TOLERANCE) {
            return Err(Error::InvalidParameter(format!(
                "tolerance {} must be in (0, {}]",
                self.tolerance,
                Self::MAX_TOLERANCE
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter(
                "max_iterations must be positive".to_string(),
            ));
        }
        if !(self.curvature_step.is_finite() && self.curvature_step > 0.0 && self.curvature_step < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "curvature_step {} must be in (0, 1)",
                self.curvature_step
            )));
        }
        if !(self.probability_floor.is_finite() && self.probability_floor > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "probability_floor {} must be positive",
                self.probability_floor
            )));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            scan_points: 64,
            tolerance: 1e-12,
            max_iterations: 200,
            curvature_step: 1e-3,
            probability_floor: 1e-300,
        }
    }
}
