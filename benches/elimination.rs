use cascade::{
    run_elimination, ArmStatistics, CandidateSetManager, ConfidenceBoundEngine, Scenario,
    SimulationConfig,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn probabilities(n_arms: usize) -> Vec<f64> {
    // Deterministic, slightly-non-uniform spread over [0.05, 0.95].
    (0..n_arms)
        .map(|i| 0.05 + 0.9 * (((i as u64) * 37 + 11) % 101) as f64 / 100.0)
        .collect()
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("confidence_bounds");
    for &n_arms in &[8usize, 64, 512] {
        let mut stats = ArmStatistics::new(n_arms);
        for i in 0..n_arms * 20 {
            stats.update(i % n_arms, i % 3 == 0);
        }
        let engine = ConfidenceBoundEngine::new(10_000, 1.5);
        group.bench_with_input(BenchmarkId::from_parameter(n_arms), &n_arms, |b, &_n| {
            b.iter(|| black_box(engine.bounds(black_box(&stats))))
        });
    }
    group.finish();
}

fn bench_maybe_eliminate(c: &mut Criterion) {
    let mut group = c.benchmark_group("maybe_eliminate");
    for &n_arms in &[8usize, 64, 512] {
        let mut stats = ArmStatistics::new(n_arms);
        for (arm, p) in probabilities(n_arms).into_iter().enumerate() {
            for j in 0..50 {
                stats.update(arm, (j as f64) < p * 50.0);
            }
        }
        let bounds = ConfidenceBoundEngine::new(10_000, 1.5).bounds(&stats);
        let manager = CandidateSetManager::new(n_arms, 4).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n_arms), &n_arms, |b, &_n| {
            b.iter(|| {
                let mut m = manager.clone();
                let mut rec = m.next_recommendation();
                black_box(m.maybe_eliminate(&mut rec, black_box(&bounds)));
            })
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_elimination");
    group.sample_size(20);
    for &n_arms in &[8usize, 32] {
        let scenario = Scenario::new(probabilities(n_arms)).unwrap();
        let cfg = SimulationConfig {
            num_positions: 3,
            horizon: 5_000,
            seed: 123,
            ..SimulationConfig::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(n_arms), &n_arms, |b, &_n| {
            b.iter(|| black_box(run_elimination(&scenario, &cfg).unwrap().ledger.final_regret()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bounds, bench_maybe_eliminate, bench_run);
criterion_main!(benches);
