//! Restriction of the search to the alias-free neighbourhood of the grid estimate

use amplitude_core::{EvaluationSchedule, Error, Result};
use serde::Serialize;

/// The part of `[0, 1]` that folds onto the grid cell of a coarse estimate.
///
/// Around folded grid index `ŷ` this is `[sin²(π(ŷ-1)/M), sin²(π(ŷ+1)/M)]`,
/// clipped at the grid ends and split at the grid value into two segments.
/// The likelihood has one local maximum per grid cell, so restricting the
/// search here removes the aliases of the true maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimaryInterval {
    /// Folded grid index `ŷ`
    pub index: usize,
    pub lower: f64,
    /// Grid value `sin²(πŷ/M)`
    pub center: f64,
    pub upper: f64,
}

impl PrimaryInterval {
    /// Primary interval of the grid cell nearest to `grid_value`
    pub fn around(grid_value: f64, schedule: &EvaluationSchedule) -> Result<Self> {
        if !(0.0..=1.0).contains(&grid_value) {
            return Err(Error::invalid_amplitude(grid_value));
        }
        let index = schedule.nearest_index(grid_value);
        let lower = if index == 0 {
            0.0
        } else {
            schedule.grid_amplitude(index - 1)
        };
        let upper = if index >= schedule.half_grid() {
            1.0
        } else {
            schedule.grid_amplitude(index + 1)
        };

        Ok(Self {
            index,
            lower,
            center: schedule.grid_amplitude(index),
            upper,
        })
    }

    /// Non-empty segments `[lower, center]` and `[center, upper]`
    pub fn segments(&self) -> impl Iterator<Item = (f64, f64)> {
        [(self.lower, self.center), (self.center, self.upper)]
            .into_iter()
            .filter(|(a, b)| b > a)
    }

    pub fn contains(&self, amplitude: f64) -> bool {
        amplitude >= self.lower && amplitude <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
