//! Criterion benchmarks for whole-batch validation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mapf_bench::{corridor, shuttle, Workload};
use mapf_checks::{Check, CheckParameters};
use mapf_codec::Seeker;
use mapf_engine::{Outcome, ValidationInput, Validator};

fn validate(validator: &Validator, w: &Workload) -> Outcome {
    let input = ValidationInput::new(&w.domain, &w.sources, &w.goals, &w.paths);
    validator.validate(&input).unwrap().outcome
}

/// Benchmark: 100 agents x 1000 timesteps of long runs.
fn bench_validate_corridor(c: &mut Criterion) {
    let w = corridor(100, 1000);
    let validator = Validator::default();
    assert_eq!(validate(&validator, &w), Outcome::Valid);
    c.bench_function("validate_corridor_100x1000", |b| {
        b.iter(|| black_box(validate(&validator, &w)));
    });
}

/// Benchmark: 100 agents x 1000 timesteps of single-step runs.
fn bench_validate_shuttle(c: &mut Criterion) {
    let w = shuttle(100, 500);
    let validator = Validator::default();
    assert_eq!(validate(&validator, &w), Outcome::Valid);
    c.bench_function("validate_shuttle_100x1000", |b| {
        b.iter(|| black_box(validate(&validator, &w)));
    });
}

/// Benchmark: the vertex-collision rule alone on one 1000-agent snapshot.
fn bench_immediate_collision_1k(c: &mut Criterion) {
    let w = corridor(1000, 4);
    let mut seeker = Seeker::new(&w.sources, &w.paths, 64).unwrap();
    let step = seeker.advance_all(0).unwrap();
    let params = CheckParameters::from_step(&step, &w.domain, &w.sources, Some(w.goals.as_slice()));
    c.bench_function("check_immediate_collision_1k", |b| {
        b.iter(|| black_box(Check::ImmediateCollision.evaluate(&params)));
    });
}

criterion_group!(
    benches,
    bench_validate_corridor,
    bench_validate_shuttle,
    bench_immediate_collision_1k
);
criterion_main!(benches);
