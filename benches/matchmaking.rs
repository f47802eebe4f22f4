//! Benchmarks for the skill-queue engine.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- select
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skill_queue::config::ContestConfig;
use skill_queue::engine::{Contest, Matchmaker};
use skill_queue::rating::{Elo, RatingUpdater};
use skill_queue::types::Team;
use skill_queue::{EngineConfig, Event, Registry, Scheduler};

// ============================================================================
// HELPER FUNCTIONS - Deterministic pools
// ============================================================================

/// Registry of `count` queued entities with seeded ratings in `[1000, 1100]`
fn queued_pool(count: usize, seed: u64) -> Registry {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut registry = Registry::with_capacity(count);
    for i in 0..count {
        let key = registry.insert(rng.gen_range(1000.0..=1100.0));
        registry.entity_mut(key).enqueue(i as u64);
    }
    registry
}

/// Mark the first `size` entities as a team in a contest
fn contest_team(registry: &mut Registry, size: usize) -> Team {
    let mut team = Team::new(size);
    for key in 0..size {
        registry.entity_mut(key).enter_match();
        team.push(key);
    }
    team
}

// ============================================================================
// BENCHMARK: Matchmaking
// ============================================================================

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    group.measurement_time(Duration::from_secs(5));

    for &pool_size in &[16usize, 256, 4096] {
        let registry = queued_pool(pool_size, 42);
        let matchmaker = Matchmaker::new(8);

        group.bench_with_input(
            BenchmarkId::new("team_of_8", pool_size),
            &registry,
            |b, registry| b.iter(|| black_box(matchmaker.select(registry, 50, 100))),
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Contest + rating update
// ============================================================================

fn bench_contest(c: &mut Criterion) {
    let mut group = c.benchmark_group("contest");
    let config = EngineConfig::default();
    let speeds = config.speed_table().expect("default speed table");

    group.bench_function("run_team_of_8", |b| {
        b.iter_batched(
            || {
                let mut registry = queued_pool(8, 7);
                let team = contest_team(&mut registry, 8);
                (registry, team)
            },
            |(mut registry, team)| {
                let mut contest =
                    Contest::start(team, &mut registry, &speeds, &ContestConfig::default());
                contest.run_to_completion(&mut registry);
                black_box(contest.finish(&registry))
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("rating_update_8", |b| {
        let updater = RatingUpdater::new(32.0);
        let model = Elo::default();
        b.iter_batched(
            || queued_pool(8, 9),
            |mut registry| {
                let order: Vec<_> = (0..8).collect();
                black_box(updater.apply(&model, &mut registry, &order))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Full scheduler ticks
// ============================================================================

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ticks");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let ticks = 10_000u64;
    group.throughput(Throughput::Elements(ticks));
    group.bench_function("simulated_100s", |b| {
        b.iter(|| {
            let config = EngineConfig {
                seed: Some(42),
                ..EngineConfig::default()
            };
            let mut scheduler = Scheduler::new(config, Vec::<Event>::new()).expect("valid config");
            for i in 0..ticks {
                scheduler.tick(i * 10);
            }
            black_box(scheduler.stats())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_select, bench_contest, bench_ticks);
criterion_main!(benches);
