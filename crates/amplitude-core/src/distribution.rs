//! Observed outcome distributions over the evaluation grid

use crate::{EvaluationSchedule, Error, Result};
use serde::{Deserialize, Serialize};

/// Tolerance on the total mass of exact probabilities
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// How a distribution was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Exact outcome probabilities, e.g. from a statevector simulation
    Exact,
    /// Outcome counts from a finite number of trials
    Sampled,
}

/// Outcome distribution over grid indices `y ∈ [0, M)`.
///
/// Stores normalized frequencies together with the number of trials that
/// produced them. In exact mode `shots` is 1 unless supplied through
/// [`OutcomeDistribution::with_shots`]. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeDistribution {
    frequencies: Vec<f64>,
    shots: u64,
    mode: SamplingMode,
}

impl OutcomeDistribution {
    /// Distribution from exact outcome probabilities
    pub fn exact(probabilities: Vec<f64>) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(Error::InvalidDistribution("no grid cells".to_string()));
        }
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(Error::non_finite("probabilities"));
        }
        if let Some((y, p)) = probabilities.iter().enumerate().find(|&(_, &p)| p < 0.0) {
            return Err(Error::InvalidDistribution(format!(
                "negative probability {p} at grid index {y}"
            )));
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(Error::InvalidDistribution(format!(
                "probabilities sum to {total}, expected 1"
            )));
        }

        Ok(Self {
            frequencies: probabilities,
            shots: 1,
            mode: SamplingMode::Exact,
        })
    }

    /// Distribution from outcome counts; `shots` is the total count
    pub fn from_counts(counts: Vec<u64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(Error::InvalidDistribution("no grid cells".to_string()));
        }
        let shots = counts
            .iter()
            .try_fold(0u64, |total, &n| total.checked_add(n))
            .ok_or_else(|| Error::InvalidDistribution("total count overflows u64".to_string()))?;
        let frequencies = if shots == 0 {
            vec![0.0; counts.len()]
        } else {
            counts.iter().map(|&n| n as f64 / shots as f64).collect()
        };

        Ok(Self {
            frequencies,
            shots,
            mode: SamplingMode::Sampled,
        })
    }

    /// Distribution from sparse `(grid index, count)` pairs over `grid_size` cells
    ///
    /// Repeated indices accumulate.
    pub fn from_count_map<I>(entries: I, grid_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        let mut counts = vec![0u64; grid_size];
        for (y, n) in entries {
            let slot = counts.get_mut(y).ok_or_else(|| {
                Error::InvalidDistribution(format!(
                    "grid index {y} outside [0, {grid_size})"
                ))
            })?;
            *slot = slot.checked_add(n).ok_or_else(|| {
                Error::InvalidDistribution(format!("count at grid index {y} overflows u64"))
            })?;
        }
        Self::from_counts(counts)
    }

    /// Attach the number of trials behind exact probabilities
    pub fn with_shots(mut self, shots: u64) -> Result<Self> {
        if self.mode != SamplingMode::Exact {
            return Err(Error::InvalidParameter(
                "shots of a sampled distribution are fixed by its counts".to_string(),
            ));
        }
        if shots == 0 {
            return Err(Error::InvalidDistribution("shots must be positive".to_string()));
        }
        self.shots = shots;
        Ok(self)
    }

    /// Number of grid cells
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Normalized frequency of grid index `y`
    pub fn frequency(&self, y: usize) -> f64 {
        self.frequencies.get(y).copied().unwrap_or(0.0)
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Expected count of grid index `y` over `shots` trials
    pub fn count(&self, y: usize) -> f64 {
        self.frequency(y) * self.shots as f64
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Total observed mass
    pub fn total_mass(&self) -> f64 {
        self.frequencies.iter().sum()
    }

    /// True when no outcome was observed
    pub fn is_degenerate(&self) -> bool {
        self.frequencies.iter().all(|&f| f <= 0.0)
    }

    /// Grid indices with positive mass and their frequencies
    pub fn observed(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, f)| f > 0.0)
    }

    /// Check that the distribution covers exactly the schedule's grid
    pub fn validate_for(&self, schedule: &EvaluationSchedule) -> Result<()> {
        if self.len() != schedule.grid_size() {
            return Err(Error::size_mismatch(schedule.grid_size(), self.len()));
        }
        Ok(())
    }
}
