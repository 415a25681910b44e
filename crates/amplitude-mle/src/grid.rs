//! Coarse amplitude estimate from the most probable grid cell

use amplitude_core::{EvaluationSchedule, OutcomeDistribution, Result};
use serde::Serialize;
use tracing::debug;

/// Result of the grid estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridEstimate {
    /// Most probable grid index `y*`
    pub index: usize,
    /// `min(y*, M - y*)`
    pub folded_index: usize,
    /// `sin²(π·folded_index/M)`
    pub amplitude: f64,
}

/// Maps an outcome distribution to the amplitude of its most probable grid cell
///
/// Ties are broken by the smallest grid index, so the estimate is reproducible.
/// A distribution whose mode lies exactly between two grid cells (for example
/// `a = 0.5` at `m = 2`, where `y = 1` and `y = 3` are equally likely) reports
/// the first of them; the value is not corrected.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridEstimator;

impl GridEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Grid estimate with the selected index
    pub fn estimate(
        &self,
        distribution: &OutcomeDistribution,
        schedule: &EvaluationSchedule,
    ) -> Result<GridEstimate> {
        distribution.validate_for(schedule)?;

        let mut index = 0;
        let mut best = distribution.frequency(0);
        for (y, &f) in distribution.frequencies().iter().enumerate().skip(1) {
            if f > best {
                best = f;
                index = y;
            }
        }

        let estimate = GridEstimate {
            index,
            folded_index: schedule.fold(index),
            amplitude: schedule.grid_amplitude(index),
        };
        debug!(
            "Grid estimate for {}: y*={} (folded {}), a={:.6}",
            schedule, estimate.index, estimate.folded_index, estimate.amplitude
        );
        Ok(estimate)
    }

    /// Amplitude of the most probable grid cell
    pub fn estimate_grid(
        &self,
        distribution: &OutcomeDistribution,
        schedule: &EvaluationSchedule,
    ) -> Result<f64> {
        self.estimate(distribution, schedule).map(|e| e.amplitude)
    }
}
