use amplitude_stats::{
    AmplitudeEstimator, EvaluationSchedule, Experiment, IntervalMethod, SamplingSimulator,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Estimate");
    let estimator = AmplitudeEstimator::default();

    for &m in &[2u32, 5, 8, 11] {
        let schedule = EvaluationSchedule::new(m).unwrap();
        let dist = SamplingSimulator::new(0.2, 1000, 42)
            .unwrap()
            .run(&schedule)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("grid_and_mle", m), &m, |b, _| {
            b.iter(|| estimator.estimate(black_box(&dist), &schedule).unwrap())
        });
    }

    group.finish();
}

fn bench_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("Report");
    let estimator = AmplitudeEstimator::default();

    for &shots in &[100u64, 10_000] {
        let schedule = EvaluationSchedule::new(6).unwrap();
        let sim = SamplingSimulator::new(0.3, shots, 7).unwrap();

        group.bench_with_input(BenchmarkId::new("all_methods", shots), &shots, |b, _| {
            b.iter(|| {
                let mut report = estimator.run(black_box(&sim), &schedule).unwrap();
                report.request(0.05, IntervalMethod::LikelihoodRatio).unwrap();
                report.request_all(0.05).ok()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimate, bench_full_report);
criterion_main!(benches);
