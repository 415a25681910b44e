//! Evaluation schedule and the grid-to-amplitude transform

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Evaluation depth `m` of one estimation run.
///
/// The depth fixes the grid size `M = 2^m`. Grid index `y` corresponds to the
/// amplitude `sin²(π·y/M)`, and `y` and `M - y` map to the same amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EvaluationSchedule {
    depth: u32,
}

impl EvaluationSchedule {
    /// Largest supported depth
    pub const MAX_DEPTH: u32 = 30;

    /// Create a schedule with evaluation depth `m`
    pub fn new(depth: u32) -> Result<Self> {
        if depth == 0 || depth > Self::MAX_DEPTH {
            return Err(Error::InvalidParameter(format!(
                "evaluation depth {depth} must be in [1, {}]",
                Self::MAX_DEPTH
            )));
        }
        Ok(Self { depth })
    }

    /// Evaluation depth `m`
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Grid size `M = 2^m`
    pub fn grid_size(&self) -> usize {
        1usize << self.depth
    }

    /// Largest folded grid index, `M / 2`
    pub fn half_grid(&self) -> usize {
        self.grid_size() / 2
    }

    /// Fold a grid index onto `[0, M/2]`; `y` and `M - y` are indistinguishable
    pub fn fold(&self, y: usize) -> usize {
        let m = self.grid_size();
        let y = y % m;
        y.min(m - y)
    }

    /// Amplitude `sin²(π·min(y, M-y)/M)` of grid index `y`
    pub fn grid_amplitude(&self, y: usize) -> f64 {
        let folded = self.fold(y) as f64;
        let s = (PI * folded / self.grid_size() as f64).sin();
        s * s
    }

    /// Folded grid index nearest to an amplitude
    pub fn nearest_index(&self, amplitude: f64) -> usize {
        let omega = crate::math::angle::amplitude_to_angle(amplitude);
        let index = (self.grid_size() as f64 * omega).round() as usize;
        index.min(self.half_grid())
    }
}

impl TryFrom<u32> for EvaluationSchedule {
    type Error = Error;

    fn try_from(depth: u32) -> Result<Self> {
        Self::new(depth)
    }
}

impl From<EvaluationSchedule> for u32 {
    fn from(schedule: EvaluationSchedule) -> Self {
        schedule.depth
    }
}

impl fmt::Display for EvaluationSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m={} (M={})", self.depth, self.grid_size())
    }
}
