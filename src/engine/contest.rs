//! Contest simulator.
//!
//! A contest advances a shared elapsed-time clock in fixed steps. After each
//! step every unfinished member is at `elapsed * speed`; a member finishes
//! at the first step where that distance exceeds the target, stamped with the
//! elapsed time and the distance reached. Standings are ordered by finish
//! time, fastest first. Members that finish on the same step keep team order.
//!
//! Elapsed time is always `steps * step`, never a running sum, so long
//! contests do not drift.
//!
//! ## Example
//!
//! ```
//! use skill_queue::config::ContestConfig;
//! use skill_queue::engine::Contest;
//! use skill_queue::registry::Registry;
//! use skill_queue::types::{SpeedTable, SpeedTier, Team};
//!
//! let speeds = SpeedTable::new(vec![SpeedTier { ceiling: 1000.0, speed: 1.0 }], 2.0).unwrap();
//!
//! let mut registry = Registry::new();
//! let mut team = Team::new(2);
//! for rating in [900.0, 1100.0] {
//!     let key = registry.insert(rating);
//!     registry.entity_mut(key).enqueue(0);
//!     registry.entity_mut(key).enter_match();
//!     team.push(key);
//! }
//!
//! let config = ContestConfig { step: 1.0, target_distance: 10.0, steps_per_tick: None };
//! let mut contest = Contest::start(team, &mut registry, &speeds, &config);
//! contest.run_to_completion(&mut registry);
//!
//! let standings = contest.finish(&registry);
//! assert_eq!(standings[0].id, 2); // the faster member
//! assert_eq!(standings[0].finish_time, 6.0);
//! assert_eq!(standings[1].finish_time, 11.0);
//! ```

use crate::config::ContestConfig;
use crate::registry::Registry;
use crate::types::{EntityId, EntityKey, SpeedTable, Team};

/// One member's final placing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standing {
    pub key: EntityKey,
    pub id: EntityId,
    /// Elapsed time at the finishing step
    pub finish_time: f64,
    /// Distance reached at the finishing step
    pub finish_distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct Runner {
    key: EntityKey,
    speed: f64,
}

/// A running contest for one team.
#[derive(Debug, Clone)]
pub struct Contest {
    team: Team,
    runners: Vec<Runner>,
    step: f64,
    target_distance: f64,
    steps_taken: u64,
    finished: usize,
}

impl Contest {
    /// Start a contest, fixing each member's speed from its current rating.
    ///
    /// Member progress is expected to be reset already (see
    /// [`Entity::enter_match`](crate::types::Entity::enter_match)).
    pub fn start(
        team: Team,
        registry: &mut Registry,
        speeds: &SpeedTable,
        config: &ContestConfig,
    ) -> Self {
        let runners = team
            .members()
            .iter()
            .map(|&key| Runner {
                key,
                speed: registry.entity_mut(key).speed(speeds),
            })
            .collect();

        Self {
            team,
            runners,
            step: config.step,
            target_distance: config.target_distance,
            steps_taken: 0,
            finished: 0,
        }
    }

    #[inline]
    pub fn team(&self) -> &Team {
        &self.team
    }

    #[inline]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Elapsed simulated contest time
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.steps_taken as f64 * self.step
    }

    /// Check if every member has finished
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished == self.runners.len()
    }

    /// Advance up to `steps` steps. Returns true once every member finished.
    pub fn advance(&mut self, registry: &mut Registry, steps: u32) -> bool {
        for _ in 0..steps {
            if self.is_finished() {
                break;
            }
            self.step_once(registry);
        }
        self.is_finished()
    }

    /// Advance until every member has finished
    pub fn run_to_completion(&mut self, registry: &mut Registry) {
        while !self.is_finished() {
            self.step_once(registry);
        }
    }

    fn step_once(&mut self, registry: &mut Registry) {
        self.steps_taken += 1;
        let elapsed = self.elapsed();

        for runner in &self.runners {
            let progress = &mut registry.entity_mut(runner.key).progress;
            if progress.finished {
                continue;
            }

            progress.distance = elapsed * runner.speed;
            if progress.distance > self.target_distance {
                progress.finished = true;
                progress.finish_time = Some(elapsed);
                progress.finish_distance = Some(progress.distance);
                self.finished += 1;
            }
        }
    }

    /// Consume the finished contest and return its standings, best first.
    ///
    /// # Panics
    ///
    /// Panics if any member has not finished.
    pub fn finish(self, registry: &Registry) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .runners
            .iter()
            .filter_map(|runner| {
                let entity = registry.entity(runner.key);
                let progress = &entity.progress;
                match (progress.finished, progress.finish_time, progress.finish_distance) {
                    (true, Some(finish_time), Some(finish_distance)) => Some(Standing {
                        key: runner.key,
                        id: entity.id,
                        finish_time,
                        finish_distance,
                    }),
                    _ => None,
                }
            })
            .collect();

        assert_eq!(
            standings.len(),
            self.team.len(),
            "contest finished with {} of {} members",
            standings.len(),
            self.team.len()
        );

        standings.sort_by(|a, b| a.finish_time.total_cmp(&b.finish_time));
        standings
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
