//! Structured engine events.
//!
//! The engine never writes output itself. Every observable step is handed to
//! an [`EventSink`] as an [`Event`]; [`TracingSink`] turns them into
//! `tracing` records and a `Vec<Event>` records them for inspection.

use tracing::{debug, info};

use crate::engine::{MatchFailure, Standing};
use crate::rating::RatingChange;
use crate::types::EntityId;

/// Something the engine did
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A new entity joined the queue
    Admitted {
        id: EntityId,
        rating: f64,
        joined_at: u64,
        next_admission_at: u64,
    },

    /// A matchmaking cycle produced no team
    MatchAttemptFailed {
        anchor: Option<EntityId>,
        threshold: u32,
        reason: MatchFailure,
    },

    /// A validated team left the queue for a contest
    MatchFormed {
        anchor: EntityId,
        members: Vec<EntityId>,
        threshold: u32,
        spread: f64,
    },

    /// Contest standings, best first
    ContestFinished { standings: Vec<Standing> },

    /// Rating changes from one contest, in finishing order
    RatingsUpdated { changes: Vec<RatingChange> },
}

impl Event {
    /// Short kebab-case name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Admitted { .. } => "admitted",
            Event::MatchAttemptFailed { .. } => "match-attempt-failed",
            Event::MatchFormed { .. } => "match-formed",
            Event::ContestFinished { .. } => "contest-finished",
            Event::RatingsUpdated { .. } => "ratings-updated",
        }
    }
}

/// Receives engine events
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// Records every event in order
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// Logs every event through `tracing`.
///
/// Admissions, formed matches and results log at `info`; failed attempts
/// and per-entity details log at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Admitted {
                id,
                rating,
                joined_at,
                next_admission_at,
            } => {
                info!(id, rating, joined_at, next_admission_at, "entity admitted");
            }
            Event::MatchAttemptFailed {
                anchor,
                threshold,
                reason,
            } => {
                debug!(?anchor, threshold, %reason, "match attempt failed");
            }
            Event::MatchFormed {
                anchor,
                members,
                threshold,
                spread,
            } => {
                info!(anchor, ?members, threshold, spread, "match formed");
            }
            Event::ContestFinished { standings } => {
                let order: Vec<EntityId> = standings.iter().map(|s| s.id).collect();
                info!(?order, "contest finished");
                for (rank, standing) in standings.iter().enumerate() {
                    debug!(
                        rank = rank + 1,
                        id = standing.id,
                        finish_time = standing.finish_time,
                        finish_distance = standing.finish_distance,
                        "standing"
                    );
                }
            }
            Event::RatingsUpdated { changes } => {
                info!(count = changes.len(), "ratings updated");
                for change in &changes {
                    debug!(
                        id = change.id,
                        rank = change.rank,
                        before = change.before,
                        after = change.after,
                        delta = change.delta,
                        "rating change"
                    );
                }
            }
        }
    }
}
