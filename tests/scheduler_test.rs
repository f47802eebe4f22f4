//! End-to-end tests for the skill-queue scheduler.
//!
//! These tests verify:
//! 1. Determinism: same seed and ticks give the same registry digest
//! 2. Capacity is never exceeded
//! 3. Teams above the spread ceiling are rejected and stay queued
//! 4. Every contest returns all members to the queue
//! 5. Stepped contests block admission and matching while they run
//!
//! ## Running
//!
//! ```bash
//! cargo test --test scheduler_test -- --nocapture
//! ```

use skill_queue::config::{ContestConfig, ThresholdConfig};
use skill_queue::engine::{MatchFailure, TickOutcome};
use skill_queue::rating::{Elo, RatingModelConfig, RatingUpdater};
use skill_queue::{EngineConfig, Event, QueueStatus, Registry, Scheduler};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Simulated milliseconds between ticks
const TICK_MS: u64 = 10;

/// Ticks per simulated run
const RUN_TICKS: u64 = 20_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn config(seed: u64) -> EngineConfig {
    EngineConfig {
        capacity: 16,
        team_size: 8,
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

fn scheduler(config: EngineConfig) -> Scheduler<Vec<Event>> {
    Scheduler::new(config, Vec::new()).expect("valid config")
}

/// Run `ticks` ticks and return the final registry digest
fn run_to_digest(config: EngineConfig, ticks: u64) -> [u8; 32] {
    let mut scheduler = scheduler(config);
    for i in 0..ticks {
        scheduler.tick(i * TICK_MS);
    }
    scheduler.context().registry.state_digest()
}

// ============================================================================
// DETERMINISM
// ============================================================================

#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    let digest1 = run_to_digest(config(42), RUN_TICKS);
    let digest2 = run_to_digest(config(42), RUN_TICKS);

    println!("  Run 1 digest: {}", hex::encode(digest1));
    println!("  Run 2 digest: {}", hex::encode(digest2));
    assert_eq!(digest1, digest2, "same seed must reproduce the registry");

    let digest3 = run_to_digest(config(43), RUN_TICKS);
    println!("  Other seed:   {}", hex::encode(digest3));
    assert_ne!(digest1, digest3, "different seeds should diverge");
}

#[test]
fn determinism_with_trueskill_model() {
    let trueskill = |seed| EngineConfig {
        rating_model: RatingModelConfig::TrueSkill {
            beta: 50.0,
            sigma: 25.0,
        },
        ..config(seed)
    };

    assert_eq!(
        run_to_digest(trueskill(9), 5_000),
        run_to_digest(trueskill(9), 5_000)
    );
}

// ============================================================================
// POOL INVARIANTS
// ============================================================================

#[test]
fn capacity_is_never_exceeded() {
    let mut scheduler = scheduler(EngineConfig {
        capacity: 10,
        team_size: 5,
        ..config(1)
    });

    for i in 0..RUN_TICKS {
        scheduler.tick(i);
        assert!(scheduler.context().registry.len() <= 10);
    }

    assert_eq!(scheduler.context().registry.len(), 10);
    assert_eq!(scheduler.stats().admissions, 10);
}

#[test]
fn threshold_stays_within_bounds() {
    let mut scheduler = scheduler(EngineConfig {
        threshold: ThresholdConfig { min: 5, max: 60 },
        ..config(2)
    });

    let mut previous = scheduler.context().threshold.current();
    for i in 0..RUN_TICKS {
        let outcome = scheduler.tick(i * TICK_MS);
        let current = scheduler.context().threshold.current();
        assert!((5..=60).contains(&current));

        match outcome {
            TickOutcome::MatchFailed { threshold, .. } => {
                assert_eq!(threshold, current);
                assert_eq!(current, (previous + 1).min(60));
            }
            TickOutcome::ContestCompleted(_) => assert_eq!(current, 5),
            _ => assert_eq!(current, previous),
        }
        previous = current;
    }
}

#[test]
fn spread_ceiling_rejects_and_keeps_entities_queued() {
    // Ratings span four times the ceiling, so wide-threshold teams overshoot it
    let mut rejections = 0;
    let mut formed = 0;

    for seed in 0..16 {
        let mut config = config(seed);
        config.threshold = ThresholdConfig { min: 0, max: 100 };
        config.admission.rating_min = 900.0;
        config.admission.rating_max = 1300.0;
        let mut scheduler = scheduler(config);

        let mut previous = scheduler.context().threshold.current();
        for i in 0..RUN_TICKS {
            let outcome = scheduler.tick(i * TICK_MS);
            let current = scheduler.context().threshold.current();

            if let TickOutcome::MatchFailed {
                reason: MatchFailure::SpreadExceeded { spread, ceiling },
                ..
            } = outcome
            {
                rejections += 1;
                assert!(spread > 100.0);
                assert_eq!(ceiling, 100);
                assert_eq!(current, (previous + 1).min(100));

                let registry = &scheduler.context().registry;
                assert_eq!(registry.in_match_count(), 0);
                assert_eq!(registry.queued_count(), registry.len());
            }
            previous = current;
        }

        for event in scheduler.sink() {
            if let Event::MatchFormed { spread, members, .. } = event {
                formed += 1;
                assert_eq!(members.len(), 8);
                assert!(*spread <= 100.0, "accepted spread {spread} above ceiling");
            }
        }
    }

    println!("  spread rejections: {rejections}, teams formed: {formed}");
    assert!(rejections > 0, "no team was rejected for its spread");
    assert!(formed > 0, "no team was accepted");
}

#[test]
fn every_contest_requeues_all_members() {
    let mut scheduler = scheduler(config(4));
    let mut completed = 0;

    for i in 0..RUN_TICKS {
        let now = i * TICK_MS;
        if let TickOutcome::ContestCompleted(summary) = scheduler.tick(now) {
            completed += 1;
            let registry = &scheduler.context().registry;

            assert_eq!(registry.in_match_count(), 0);
            assert_eq!(summary.standings.len(), 8);
            assert_eq!(summary.changes.len(), 8);

            let mut ids: Vec<_> = summary.standings.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 8);

            for (position, standing) in summary.standings.iter().enumerate() {
                let entity = registry.entity(standing.key);
                assert_eq!(entity.status(), QueueStatus::Queued);
                assert_eq!(entity.joined_at, now + position as u64);
            }
            assert!(summary
                .standings
                .windows(2)
                .all(|w| w[0].finish_time <= w[1].finish_time));

            let total: f64 = summary.changes.iter().map(|c| c.delta).sum();
            assert!(total.abs() < 1e-9, "Elo deltas should cancel out, got {total}");
        }
    }

    assert!(completed > 0);
    assert_eq!(scheduler.stats().contests_completed, completed);
}

#[test]
fn events_follow_tick_order() {
    let mut scheduler = scheduler(config(5));
    for i in 0..RUN_TICKS {
        scheduler.tick(i * TICK_MS);
    }

    let events = scheduler.sink();
    for (i, event) in events.iter().enumerate() {
        if let Event::MatchFormed { .. } = event {
            assert_eq!(events[i + 1].kind(), "contest-finished");
            assert_eq!(events[i + 2].kind(), "ratings-updated");
        }
    }

    let stats = scheduler.stats();
    let count = |kind: &str| events.iter().filter(|e| e.kind() == kind).count() as u64;
    assert_eq!(count("admitted"), stats.admissions);
    assert_eq!(count("match-attempt-failed"), stats.failed_attempts);
    assert_eq!(count("match-formed"), stats.matches_formed);
    assert_eq!(count("contest-finished"), stats.contests_completed);
}

// ============================================================================
// STEPPED CONTESTS
// ============================================================================

#[test]
fn stepped_contest_is_exclusive() {
    let mut scheduler = scheduler(EngineConfig {
        contest: ContestConfig {
            steps_per_tick: Some(25),
            ..ContestConfig::default()
        },
        ..config(6)
    });

    let mut running_ticks = 0;
    let mut contests = 0;
    for i in 0..RUN_TICKS {
        let len_before = scheduler.context().registry.len();
        let events_before = scheduler.sink().len();
        let was_running = scheduler.context().is_contest_running();

        let outcome = scheduler.tick(i * TICK_MS);

        if was_running {
            assert_eq!(scheduler.context().registry.len(), len_before);
            match outcome {
                TickOutcome::ContestRunning { .. } => {
                    running_ticks += 1;
                    assert_eq!(scheduler.sink().len(), events_before);
                    assert_eq!(scheduler.context().registry.in_match_count(), 8);
                }
                TickOutcome::ContestCompleted(_) => contests += 1,
                other => panic!("tick during a contest produced {other:?}"),
            }
        }
    }

    assert!(contests > 0);
    assert!(running_ticks > contests);
}

#[test]
fn stop_drains_running_contest() {
    let mut scheduler = scheduler(EngineConfig {
        contest: ContestConfig {
            steps_per_tick: Some(1),
            ..ContestConfig::default()
        },
        ..config(7)
    });

    let mut now = 0;
    while !scheduler.context().is_contest_running() {
        scheduler.tick(now);
        now += TICK_MS;
        assert!(now < RUN_TICKS * TICK_MS, "no contest started");
    }

    scheduler.stop();
    assert!(matches!(scheduler.tick(now), TickOutcome::ContestCompleted(_)));
    assert_eq!(scheduler.tick(now + TICK_MS), TickOutcome::Stopped);
    assert_eq!(scheduler.context().registry.in_match_count(), 0);
}

// ============================================================================
// RATING SCENARIO
// ============================================================================

#[test]
fn reversed_finish_order_scenario() {
    let ratings = [1000.0, 1005.0, 1010.0, 1015.0, 1020.0, 1025.0, 1030.0, 1035.0];
    let mut registry = Registry::new();
    let order: Vec<_> = ratings.iter().map(|&r| registry.insert(r)).collect();

    // Lowest-rated finishes first
    let changes = RatingUpdater::new(32.0)
        .apply(&Elo::default(), &mut registry, &order)
        .expect("eight finishers");

    assert!(registry.entity(order[0]).rating() > 1000.0);
    assert!(registry.entity(order[7]).rating() < 1035.0);

    let magnitude: Vec<f64> = changes.iter().map(|c| c.delta.abs()).collect();
    for i in 0..3 {
        assert!(magnitude[i] > magnitude[i + 1]);
        assert!(magnitude[7 - i] > magnitude[6 - i]);
    }
}
