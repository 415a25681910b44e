//! Simulated experiments for testing and benchmarking

use amplitude_core::{
    EvaluationSchedule, Error, Experiment, LikelihoodKernel, OutcomeDistribution,
    PhaseEstimationKernel, Result,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn check_amplitude(amplitude: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&amplitude) {
        return Err(Error::invalid_amplitude(amplitude));
    }
    Ok(())
}

/// Experiment returning the exact kernel probabilities of a fixed amplitude
#[derive(Debug, Clone)]
pub struct ExactSimulator<K = PhaseEstimationKernel> {
    amplitude: f64,
    kernel: K,
    shots: Option<u64>,
}

impl ExactSimulator<PhaseEstimationKernel> {
    pub fn new(amplitude: f64) -> Result<Self> {
        Self::with_kernel(amplitude, PhaseEstimationKernel)
    }
}

impl<K: LikelihoodKernel> ExactSimulator<K> {
    pub fn with_kernel(amplitude: f64, kernel: K) -> Result<Self> {
        check_amplitude(amplitude)?;
        Ok(Self {
            amplitude,
            kernel,
            shots: None,
        })
    }

    /// Report the probabilities as backed by `shots` trials
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = Some(shots);
        self
    }
}

impl<K: LikelihoodKernel> Experiment for ExactSimulator<K> {
    fn run(&self, schedule: &EvaluationSchedule) -> Result<OutcomeDistribution> {
        let dist = OutcomeDistribution::exact(self.kernel.probabilities(self.amplitude, schedule))?;
        match self.shots {
            Some(shots) => dist.with_shots(shots),
            None => Ok(dist),
        }
    }
}

/// Experiment drawing `shots` outcomes from the kernel with a seeded generator
///
/// Every run with the same seed produces the same counts.
#[derive(Debug, Clone)]
pub struct SamplingSimulator<K = PhaseEstimationKernel> {
    amplitude: f64,
    shots: u64,
    seed: u64,
    kernel: K,
}

impl SamplingSimulator<PhaseEstimationKernel> {
    pub fn new(amplitude: f64, shots: u64, seed: u64) -> Result<Self> {
        Self::with_kernel(amplitude, shots, seed, PhaseEstimationKernel)
    }
}

impl<K: LikelihoodKernel> SamplingSimulator<K> {
    pub fn with_kernel(amplitude: f64, shots: u64, seed: u64, kernel: K) -> Result<Self> {
        check_amplitude(amplitude)?;
        if shots == 0 {
            return Err(Error::InvalidParameter("shots must be positive".to_string()));
        }
        Ok(Self {
            amplitude,
            shots,
            seed,
            kernel,
        })
    }
}

impl<K: LikelihoodKernel> Experiment for SamplingSimulator<K> {
    fn run(&self, schedule: &EvaluationSchedule) -> Result<OutcomeDistribution> {
        let probabilities = self.kernel.probabilities(self.amplitude, schedule);
        let outcomes = WeightedIndex::new(&probabilities).map_err(|e| {
            Error::Computation(format!("Invalid kernel probabilities: {}", e))
        })?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut counts = vec![0u64; schedule.grid_size()];
        for _ in 0..self.shots {
            counts[outcomes.sample(&mut rng)] += 1;
        }
        OutcomeDistribution::from_counts(counts)
    }
}
