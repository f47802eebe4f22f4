//! Matchmaker: anchor selection, greedy collection and spread validation.
//!
//! ## Algorithm
//!
//! 1. The queued entity with the oldest join timestamp is the **anchor** and
//!    is always the first team member.
//! 2. The remaining queued entities are scanned in registry order (not
//!    wait-time order). Each one within `threshold` of the anchor's rating
//!    joins, until the team is full.
//! 3. A short team is a routine failure: the caller widens the threshold and
//!    retries next tick.
//! 4. A full team is validated: `max(rating) - min(rating)` must not exceed
//!    the hard ceiling (the threshold controller's `max`). A valid team is
//!    marked `InMatch` and the threshold snaps back to `min`.
//!
//! Companions are scanned in registry order, so a long-waiting entity that
//! is not the anchor can be passed over while a closer-rated newcomer is
//! picked. Progress comes from the widening threshold, not from reordering.

use crate::engine::threshold::ThresholdController;
use crate::registry::Registry;
use crate::types::{EntityKey, Team};

/// Why a match attempt did not produce a team. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchFailure {
    /// Nobody is queued
    NoQueuedEntities,
    /// Fewer queued entities than one team needs
    NotEnoughQueued { queued: usize, needed: usize },
    /// Not enough queued entities within the threshold of the anchor
    NotEnoughCompatible { collected: usize, needed: usize },
    /// A full team was collected but its rating spread is above the ceiling
    SpreadExceeded { spread: f64, ceiling: u32 },
}

impl std::fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchFailure::NoQueuedEntities => write!(f, "no queued entities"),
            MatchFailure::NotEnoughQueued { queued, needed } => {
                write!(f, "{queued} queued, {needed} needed")
            }
            MatchFailure::NotEnoughCompatible { collected, needed } => {
                write!(f, "{collected} within threshold, {needed} needed")
            }
            MatchFailure::SpreadExceeded { spread, ceiling } => {
                write!(f, "team spread {spread:.1} exceeds ceiling {ceiling}")
            }
        }
    }
}

/// Outcome of one matchmaking cycle
#[derive(Debug, Clone, PartialEq)]
pub enum MatchAttempt {
    /// A validated team
    Formed {
        team: Team,
        /// Threshold used for collection
        threshold: u32,
        /// `max(rating) - min(rating)` over the team
        spread: f64,
    },
    /// No team this cycle
    Failed {
        anchor: Option<EntityKey>,
        threshold: u32,
        reason: MatchFailure,
    },
}

impl MatchAttempt {
    /// Check if a team was formed
    pub fn is_formed(&self) -> bool {
        matches!(self, MatchAttempt::Formed { .. })
    }
}

/// Builds fixed-size teams from the queued pool.
///
/// ## Example
///
/// ```
/// use skill_queue::engine::{Matchmaker, ThresholdController};
/// use skill_queue::registry::Registry;
///
/// let mut registry = Registry::new();
/// for (i, rating) in [1000.0, 1400.0, 1008.0].into_iter().enumerate() {
///     let key = registry.insert(rating);
///     registry.entity_mut(key).enqueue(i as u64);
/// }
///
/// let matchmaker = Matchmaker::new(2);
/// let mut threshold = ThresholdController::new(10, 100);
///
/// let attempt = matchmaker.attempt(&mut registry, &mut threshold);
/// assert!(attempt.is_formed());
/// assert_eq!(registry.in_match_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchmaker {
    team_size: usize,
}

impl Matchmaker {
    /// Create a matchmaker for teams of `team_size`
    pub fn new(team_size: usize) -> Self {
        Self { team_size }
    }

    /// Members per team
    #[inline]
    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Select and validate a team without mutating anything.
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry holding the queued pool
    /// * `threshold` - Maximum rating gap to the anchor
    /// * `ceiling` - Hard ceiling on the team's rating spread
    pub fn select(&self, registry: &Registry, threshold: u32, ceiling: u32) -> MatchAttempt {
        let Some(anchor_key) = registry.oldest_queued() else {
            return MatchAttempt::Failed {
                anchor: None,
                threshold,
                reason: MatchFailure::NoQueuedEntities,
            };
        };

        let queued = registry.queued_count();
        if queued < self.team_size {
            return MatchAttempt::Failed {
                anchor: Some(anchor_key),
                threshold,
                reason: MatchFailure::NotEnoughQueued {
                    queued,
                    needed: self.team_size,
                },
            };
        }

        let anchor_rating = registry.entity(anchor_key).rating();
        let window = f64::from(threshold);

        let mut team = Team::new(self.team_size);
        team.push(anchor_key);

        for (key, entity) in registry.queued() {
            if team.is_full() {
                break;
            }
            if key == anchor_key {
                continue;
            }
            if (entity.rating() - anchor_rating).abs() <= window {
                team.push(key);
            }
        }

        if !team.is_full() {
            return MatchAttempt::Failed {
                anchor: Some(anchor_key),
                threshold,
                reason: MatchFailure::NotEnoughCompatible {
                    collected: team.len(),
                    needed: self.team_size,
                },
            };
        }

        let spread = team_spread(registry, &team);
        if spread > f64::from(ceiling) {
            return MatchAttempt::Failed {
                anchor: Some(anchor_key),
                threshold,
                reason: MatchFailure::SpreadExceeded { spread, ceiling },
            };
        }

        MatchAttempt::Formed {
            team,
            threshold,
            spread,
        }
    }

    /// Run one matchmaking cycle.
    ///
    /// On success every member is marked `InMatch` and the threshold is reset
    /// to its minimum. On failure nothing changes; widening is left to the
    /// caller.
    ///
    /// # Panics
    ///
    /// Panics if a selected member is not `Queued`.
    pub fn attempt(
        &self,
        registry: &mut Registry,
        threshold: &mut ThresholdController,
    ) -> MatchAttempt {
        let attempt = self.select(registry, threshold.current(), threshold.max());

        if let MatchAttempt::Formed { team, .. } = &attempt {
            for &key in team.members() {
                registry.entity_mut(key).enter_match();
            }
            threshold.reset();
        }

        attempt
    }
}

/// `max(rating) - min(rating)` over a team
pub fn team_spread(registry: &Registry, team: &Team) -> f64 {
    let (low, high) = team
        .members()
        .iter()
        .map(|&key| registry.entity(key).rating())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), rating| {
            (low.min(rating), high.max(rating))
        });

    if team.is_empty() {
        0.0
    } else {
        high - low
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
