//! Entity type: one participant known to the matchmaking engine.
//!
//! ## Lifecycle
//!
//! Entities are created once at admission and never destroyed. They cycle
//! through queue states:
//!
//! ```text
//! NotQueued -> Queued -> InMatch -> Queued -> InMatch -> ...
//! ```
//!
//! ## Derived Speed
//!
//! Contest speed is derived from rating through a [`SpeedTable`]. The value
//! is computed lazily and cached, and the cache is dropped whenever the
//! rating changes, so a contest never runs on a speed derived from a stale
//! rating.

use crate::types::speed::SpeedTable;

/// Stable entity identifier (assigned by the registry, starting at 1)
pub type EntityId = u64;

/// Registry handle for an entity (slab key). Pools and teams hold handles,
/// never copies, so rating and status changes are visible through every holder.
pub type EntityKey = usize;

// ============================================================================
// QueueStatus enum
// ============================================================================

/// Queue status of an entity.
///
/// Only `Queued` entities are eligible for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueStatus {
    /// Known to the registry but not waiting for a match
    #[default]
    NotQueued,
    /// Waiting in the pool
    Queued,
    /// Taking part in a running contest
    InMatch,
}

impl QueueStatus {
    /// Convert to u8 for state digests
    pub fn to_u8(self) -> u8 {
        match self {
            QueueStatus::NotQueued => 0,
            QueueStatus::Queued => 1,
            QueueStatus::InMatch => 2,
        }
    }
}

// ============================================================================
// ContestProgress struct
// ============================================================================

/// Per-contest progress of an entity. Reset at the start of every contest.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContestProgress {
    /// Distance covered so far
    pub distance: f64,

    /// Whether the entity crossed the target distance
    pub finished: bool,

    /// Elapsed contest time at which the entity finished
    pub finish_time: Option<f64>,

    /// Distance recorded on the step the entity finished
    pub finish_distance: Option<f64>,
}

impl ContestProgress {
    /// Clear all progress for a fresh contest
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Entity struct
// ============================================================================

/// A participant in the matchmaking pool.
///
/// `rating` and `status` are private: ratings change only through
/// [`Entity::apply_rating_delta`] (which also invalidates the cached speed),
/// and status changes only through the queue transitions below.
///
/// ## Example
///
/// ```
/// use skill_queue::types::{Entity, QueueStatus};
///
/// let mut entity = Entity::new(1, 1000.0);
/// assert_eq!(entity.status(), QueueStatus::NotQueued);
///
/// entity.enqueue(250);
/// assert!(entity.is_queued());
/// assert_eq!(entity.joined_at, 250);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier, stable for the process lifetime
    pub id: EntityId,

    /// Current rating
    rating: f64,

    /// Simulated time (ms) the entity last joined the queue
    pub joined_at: u64,

    /// Queue status
    status: QueueStatus,

    /// Progress in the current (or most recent) contest
    pub progress: ContestProgress,

    /// Cached contest speed, derived from `rating`
    speed: Option<f64>,
}

impl Entity {
    /// Create a new entity that is not yet queued
    pub fn new(id: EntityId, rating: f64) -> Self {
        Self {
            id,
            rating,
            joined_at: 0,
            status: QueueStatus::NotQueued,
            progress: ContestProgress::default(),
            speed: None,
        }
    }

    /// Current rating
    #[inline]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Add a rating delta and drop the cached speed
    pub fn apply_rating_delta(&mut self, delta: f64) {
        self.rating += delta;
        self.speed = None;
    }

    /// Contest speed for the current rating, computed on first use
    pub fn speed(&mut self, table: &SpeedTable) -> f64 {
        let rating = self.rating;
        *self.speed.get_or_insert_with(|| table.speed_for(rating))
    }

    /// Cached speed, if one has been computed since the last rating change
    #[inline]
    pub fn cached_speed(&self) -> Option<f64> {
        self.speed
    }

    /// Current queue status
    #[inline]
    pub fn status(&self) -> QueueStatus {
        self.status
    }

    /// Check if the entity is eligible for matching
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.status == QueueStatus::Queued
    }

    /// Check if the entity is in a running contest
    #[inline]
    pub fn is_in_match(&self) -> bool {
        self.status == QueueStatus::InMatch
    }

    /// Join (or rejoin) the queue at `at`
    pub fn enqueue(&mut self, at: u64) {
        self.status = QueueStatus::Queued;
        self.joined_at = at;
    }

    /// Leave the queue for a contest and reset contest progress
    ///
    /// # Panics
    ///
    /// Panics if the entity is not `Queued`; a team may only be built from
    /// the queued pool.
    pub fn enter_match(&mut self) {
        assert!(
            self.is_queued(),
            "entity {} selected for a match while {:?}",
            self.id,
            self.status
        );
        self.status = QueueStatus::InMatch;
        self.progress.reset();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
