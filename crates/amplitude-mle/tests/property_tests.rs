//! Property-based tests for the grid estimator and likelihood maximizer

use amplitude_core::{
    EvaluationSchedule, LikelihoodKernel, OutcomeDistribution, PhaseEstimationKernel,
};
use amplitude_mle::{GridEstimator, LikelihoodMaximizer, PrimaryInterval};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Mirrored outcomes y and M - y are indistinguishable
    #[test]
    fn prop_kernel_symmetry(a in 0.0f64..=1.0, m in 1u32..8) {
        let schedule = EvaluationSchedule::new(m).unwrap();
        let grid = schedule.grid_size();
        for y in 1..grid {
            prop_assert_eq!(
                PhaseEstimationKernel.probability(y, a, &schedule),
                PhaseEstimationKernel.probability(grid - y, a, &schedule)
            );
        }
    }

    #[test]
    fn prop_mirrored_counts_give_same_grid_value(counts in proptest::collection::vec(0u64..50, 16)) {
        prop_assume!(counts.iter().any(|&n| n > 0));
        let schedule = EvaluationSchedule::new(4).unwrap();
        let mirrored: Vec<u64> = (0..16).map(|y| counts[(16 - y) % 16]).collect();

        let original = OutcomeDistribution::from_counts(counts).unwrap();
        let mirrored = OutcomeDistribution::from_counts(mirrored).unwrap();
        let a = GridEstimator.estimate_grid(&original, &schedule).unwrap();
        let b = GridEstimator.estimate_grid(&mirrored, &schedule).unwrap();
        // Ties may resolve to different cells, but never to an unfolded amplitude
        prop_assert!((0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&b));
        let best = original.frequencies().iter().cloned().fold(0.0, f64::max);
        let unique = original.frequencies().iter().filter(|&&f| f == best).count() == 1;
        if unique {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn prop_mle_stays_in_primary_interval(counts in proptest::collection::vec(0u64..200, 8)) {
        prop_assume!(counts.iter().any(|&n| n > 0));
        let schedule = EvaluationSchedule::new(3).unwrap();
        let dist = OutcomeDistribution::from_counts(counts).unwrap();
        let grid = GridEstimator.estimate_grid(&dist, &schedule).unwrap();
        let interval = PrimaryInterval::around(grid, &schedule).unwrap();

        let mle = LikelihoodMaximizer::default()
            .maximize(&dist, &PhaseEstimationKernel, &schedule, grid)
            .unwrap();
        prop_assert!(interval.contains(mle), "{} outside [{}, {}]", mle, interval.lower, interval.upper);
    }
}
