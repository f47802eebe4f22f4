//! Scheduler: one cooperative tick function driving the whole engine.
//!
//! ## Tick Order
//!
//! 1. A contest is running: advance it (stepped mode) or do nothing else.
//! 2. Otherwise try one admission. An admission ends the tick.
//! 3. Otherwise run one matchmaking cycle.
//! 4. Failed cycle: widen the threshold.
//! 5. Formed team: start the contest. Without `steps_per_tick` it runs to
//!    completion in this tick; with it, later ticks advance it.
//!
//! Completing a contest applies the rating update and re-queues every member
//! with a join time staggered by finishing position.
//!
//! ## Exclusivity
//!
//! [`SchedulerContext`] owns the registry and the single contest slot. While
//! the slot is occupied, admission reports
//! [`Admission::ContestInProgress`] and no team can form, so pool mutations
//! are serialized behind the contest.
//!
//! The scheduler has no clock of its own. The driver passes `now` (simulated
//! milliseconds) to every [`Scheduler::tick`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::engine::admission::{Admission, AdmissionController};
use crate::engine::contest::{Contest, Standing};
use crate::engine::matchmaker::{MatchAttempt, MatchFailure, Matchmaker};
use crate::engine::threshold::ThresholdController;
use crate::error::ConfigResult;
use crate::events::{Event, EventSink, TracingSink};
use crate::rating::{RatingChange, RatingModel, RatingUpdater};
use crate::registry::Registry;
use crate::types::{EntityId, EntityKey, SpeedTable};

// ============================================================================
// Outcomes
// ============================================================================

/// What one tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A stepped contest advanced and is still running
    ContestRunning { steps_taken: u64 },
    /// An entity joined the queue
    Admitted { id: EntityId, rating: f64 },
    /// No team formed; the threshold now stands at `threshold`
    MatchFailed { reason: MatchFailure, threshold: u32 },
    /// A team formed and a stepped contest began
    ContestStarted { members: Vec<EntityId> },
    /// A contest finished and ratings were updated
    ContestCompleted(ContestSummary),
    /// The scheduler is stopped and nothing is left to finish
    Stopped,
}

/// Result of one completed contest
#[derive(Debug, Clone, PartialEq)]
pub struct ContestSummary {
    /// Standings, best first
    pub standings: Vec<Standing>,
    /// Rating changes in finishing order
    pub changes: Vec<RatingChange>,
}

/// Running counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Ticks that did work (ticks after stop with nothing to finish are not counted)
    pub ticks: u64,
    pub admissions: u64,
    pub failed_attempts: u64,
    pub matches_formed: u64,
    pub contests_completed: u64,
}

// ============================================================================
// Context
// ============================================================================

/// State shared by the engine components.
///
/// The registry is the only structure more than one component mutates. The
/// contest slot gates every mutation that is not part of the running contest.
#[derive(Debug)]
pub struct SchedulerContext {
    pub registry: Registry,
    pub threshold: ThresholdController,
    pub admission: AdmissionController,
    rng: ChaCha8Rng,
    active_contest: Option<Contest>,
}

impl SchedulerContext {
    /// Build an empty context. The RNG is seeded from `config.seed`, or from
    /// OS entropy when unset.
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            registry: Registry::with_capacity(config.capacity),
            threshold: ThresholdController::from_config(&config.threshold),
            admission: AdmissionController::new(config.capacity, config.admission),
            rng,
            active_contest: None,
        }
    }

    /// Check if a contest holds the exclusivity slot
    #[inline]
    pub fn is_contest_running(&self) -> bool {
        self.active_contest.is_some()
    }

    /// The running contest, if any
    pub fn active_contest(&self) -> Option<&Contest> {
        self.active_contest.as_ref()
    }

    /// Admit at most one entity, refusing while a contest runs
    pub fn try_admit(&mut self, now: u64) -> Admission {
        if self.is_contest_running() {
            return Admission::ContestInProgress;
        }
        self.admission.try_admit(now, &mut self.registry, &mut self.rng)
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// Drives admission, matchmaking, contests and rating updates.
///
/// ## Example
///
/// ```
/// use skill_queue::config::EngineConfig;
/// use skill_queue::engine::{Scheduler, TickOutcome};
/// use skill_queue::events::Event;
///
/// let config = EngineConfig {
///     capacity: 4,
///     team_size: 2,
///     seed: Some(7),
///     ..EngineConfig::default()
/// };
/// let mut scheduler = Scheduler::new(config, Vec::<Event>::new()).unwrap();
///
/// assert!(matches!(scheduler.tick(0), TickOutcome::Admitted { .. }));
/// for now in (10..20_000).step_by(10) {
///     scheduler.tick(now);
/// }
///
/// assert_eq!(scheduler.context().registry.len(), 4);
/// assert!(scheduler.stats().contests_completed > 0);
/// ```
pub struct Scheduler<S: EventSink = TracingSink> {
    config: EngineConfig,
    speeds: SpeedTable,
    matchmaker: Matchmaker,
    updater: RatingUpdater,
    model: Box<dyn RatingModel>,
    context: SchedulerContext,
    sink: S,
    stats: SchedulerStats,
    stopped: bool,
}

impl Scheduler<TracingSink> {
    /// Scheduler that logs events through `tracing`
    pub fn with_tracing(config: EngineConfig) -> ConfigResult<Self> {
        Self::new(config, TracingSink)
    }
}

impl<S: EventSink> Scheduler<S> {
    /// Validate the configuration and build an idle scheduler
    pub fn new(config: EngineConfig, sink: S) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self {
            speeds: config.speed_table()?,
            matchmaker: Matchmaker::new(config.team_size),
            updater: RatingUpdater::new(config.k_factor),
            model: config.rating_model.build(),
            context: SchedulerContext::new(&config),
            config,
            sink,
            stats: SchedulerStats::default(),
            stopped: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn context(&self) -> &SchedulerContext {
        &self.context
    }

    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Stop scheduling new work. A running contest still finishes on the
    /// next tick.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Run one tick at simulated time `now` (milliseconds)
    pub fn tick(&mut self, now: u64) -> TickOutcome {
        if self.stopped && !self.context.is_contest_running() {
            return TickOutcome::Stopped;
        }
        self.stats.ticks += 1;

        if let Some(mut contest) = self.context.active_contest.take() {
            let registry = &mut self.context.registry;
            let done = match self.config.contest.steps_per_tick {
                Some(steps) if !self.stopped => contest.advance(registry, steps),
                _ => {
                    contest.run_to_completion(registry);
                    true
                }
            };

            if !done {
                let steps_taken = contest.steps_taken();
                self.context.active_contest = Some(contest);
                return TickOutcome::ContestRunning { steps_taken };
            }
            return TickOutcome::ContestCompleted(self.complete(contest, now));
        }

        if let Admission::Admitted {
            key,
            id,
            rating,
            next_at,
        } = self.context.try_admit(now)
        {
            self.stats.admissions += 1;
            self.sink.emit(Event::Admitted {
                id,
                rating,
                joined_at: self.context.registry.entity(key).joined_at,
                next_admission_at: next_at,
            });
            return TickOutcome::Admitted { id, rating };
        }

        let attempt = self
            .matchmaker
            .attempt(&mut self.context.registry, &mut self.context.threshold);

        match attempt {
            MatchAttempt::Failed {
                anchor,
                threshold,
                reason,
            } => {
                self.stats.failed_attempts += 1;
                self.sink.emit(Event::MatchAttemptFailed {
                    anchor: anchor.map(|key| self.context.registry.entity(key).id),
                    threshold,
                    reason,
                });

                self.context.threshold.widen();
                TickOutcome::MatchFailed {
                    reason,
                    threshold: self.context.threshold.current(),
                }
            }
            MatchAttempt::Formed {
                team,
                threshold,
                spread,
            } => {
                self.stats.matches_formed += 1;
                let members = self.ids(team.members());
                self.sink.emit(Event::MatchFormed {
                    anchor: members[0],
                    members: members.clone(),
                    threshold,
                    spread,
                });

                let mut contest = Contest::start(
                    team,
                    &mut self.context.registry,
                    &self.speeds,
                    &self.config.contest,
                );

                if self.config.contest.steps_per_tick.is_some() {
                    self.context.active_contest = Some(contest);
                    return TickOutcome::ContestStarted { members };
                }

                contest.run_to_completion(&mut self.context.registry);
                TickOutcome::ContestCompleted(self.complete(contest, now))
            }
        }
    }

    /// Publish standings, update ratings and re-queue the members
    fn complete(&mut self, contest: Contest, now: u64) -> ContestSummary {
        let standings = contest.finish(&self.context.registry);
        self.sink.emit(Event::ContestFinished {
            standings: standings.clone(),
        });

        let order: Vec<EntityKey> = standings.iter().map(|s| s.key).collect();
        let changes = self
            .updater
            .apply(self.model.as_ref(), &mut self.context.registry, &order)
            .unwrap_or_default();
        if !changes.is_empty() {
            self.sink.emit(Event::RatingsUpdated {
                changes: changes.clone(),
            });
        }

        let stagger = self.config.requeue_stagger_ms;
        for (position, &key) in order.iter().enumerate() {
            let entity = self.context.registry.entity_mut(key);
            assert!(
                entity.is_in_match(),
                "finisher {} was not in a match",
                entity.id
            );
            entity.enqueue(now.saturating_add((position as u64).saturating_mul(stagger)));
        }

        self.stats.contests_completed += 1;
        ContestSummary { standings, changes }
    }

    fn ids(&self, keys: &[EntityKey]) -> Vec<EntityId> {
        keys.iter()
            .map(|&key| self.context.registry.entity(key).id)
            .collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
