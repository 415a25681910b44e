//! Estimation results with on-demand confidence intervals

use crate::estimator::{AmplitudeEstimator, Estimate};
use amplitude_confidence::{ConfidenceInterval, IntervalMethod};
use amplitude_core::{Error, LikelihoodKernel, OutcomeDistribution, Result, SamplingMode};
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type IntervalKey = (IntervalMethod, OrderedFloat<f64>);

/// Grid estimate, MLE and any intervals requested so far for one run
///
/// Intervals are computed on first request and cached by method and `alpha`,
/// so asking again returns the stored interval without recomputation.
#[derive(Debug)]
pub struct EstimationReport<'a, K> {
    estimator: &'a AmplitudeEstimator<K>,
    distribution: OutcomeDistribution,
    estimate: Estimate,
    intervals: BTreeMap<IntervalKey, ConfidenceInterval>,
}

impl<'a, K: LikelihoodKernel> EstimationReport<'a, K> {
    pub(crate) fn new(
        estimator: &'a AmplitudeEstimator<K>,
        distribution: OutcomeDistribution,
        estimate: Estimate,
    ) -> Self {
        Self {
            estimator,
            distribution,
            estimate,
            intervals: BTreeMap::new(),
        }
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    pub fn grid_value(&self) -> f64 {
        self.estimate.grid_value
    }

    pub fn mle_value(&self) -> f64 {
        self.estimate.mle_value
    }

    pub fn distribution(&self) -> &OutcomeDistribution {
        &self.distribution
    }

    /// Interval by `method` at level `alpha`, computed once and cached
    pub fn request(&mut self, alpha: f64, method: IntervalMethod) -> Result<ConfidenceInterval> {
        let key = (method, OrderedFloat(alpha));
        if let Some(ci) = self.intervals.get(&key) {
            return Ok(*ci);
        }

        let ci = self
            .estimator
            .confidence_interval(&self.estimate, &self.distribution, alpha, method)?;
        debug!("Computed {}", ci);
        self.intervals.insert(key, ci);
        Ok(ci)
    }

    /// Intervals by every method at level `alpha`
    ///
    /// Missing intervals are computed in parallel with the `parallel` feature.
    /// Intervals that succeed are cached even when another method fails.
    pub fn request_all(&mut self, alpha: f64) -> Result<Vec<ConfidenceInterval>> {
        let missing: Vec<IntervalMethod> = IntervalMethod::ALL
            .into_iter()
            .filter(|&method| !self.intervals.contains_key(&(method, OrderedFloat(alpha))))
            .collect();

        let estimator = self.estimator;
        let estimate = &self.estimate;
        let distribution = &self.distribution;
        let compute = |method: IntervalMethod| {
            estimator.confidence_interval(estimate, distribution, alpha, method)
        };

        #[cfg(feature = "parallel")]
        let computed: Vec<Result<ConfidenceInterval>> = missing.into_par_iter().map(compute).collect();
        #[cfg(not(feature = "parallel"))]
        let computed: Vec<Result<ConfidenceInterval>> = missing.into_iter().map(compute).collect();

        let mut first_error = None;
        for result in computed {
            match result {
                Ok(ci) => {
                    self.intervals.insert((ci.method, OrderedFloat(alpha)), ci);
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        Ok(IntervalMethod::ALL
            .iter()
            .filter_map(|&method| self.get(method, alpha).copied())
            .collect())
    }

    /// Cached interval, if it has been requested
    pub fn get(&self, method: IntervalMethod, alpha: f64) -> Option<&ConfidenceInterval> {
        self.intervals.get(&(method, OrderedFloat(alpha)))
    }

    /// Every cached interval, ordered by method then `alpha`
    pub fn intervals(&self) -> impl Iterator<Item = &ConfidenceInterval> {
        self.intervals.values()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Computation(format!("Failed to serialize report: {}", e)))
    }
}

#[derive(Serialize)]
struct ReportView<'r> {
    grid_value: f64,
    mle_value: f64,
    depth: u32,
    grid_size: usize,
    shots: u64,
    mode: SamplingMode,
    intervals: Vec<&'r ConfidenceInterval>,
}

impl<K> Serialize for EstimationReport<'_, K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ReportView {
            grid_value: self.estimate.grid_value,
            mle_value: self.estimate.mle_value,
            depth: self.estimate.schedule.depth(),
            grid_size: self.estimate.schedule.grid_size(),
            shots: self.distribution.shots(),
            mode: self.distribution.mode(),
            intervals: self.intervals.values().collect(),
        }
        .serialize(serializer)
    }
}
