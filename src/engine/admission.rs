//! Admission controller: grows the registry toward capacity.
//!
//! Each admission creates one entity with a rating drawn uniformly from the
//! configured range, queues it at `now`, and schedules the next admission at
//! `now + uniform(min_gap, max_gap)`. Once the registry is at capacity every
//! call is a no-op.

use rand::Rng;

use crate::config::AdmissionConfig;
use crate::registry::Registry;
use crate::types::{EntityId, EntityKey};

/// Result of one admission attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    /// A new entity joined the queue
    Admitted {
        key: EntityKey,
        id: EntityId,
        rating: f64,
        /// When the following admission becomes due
        next_at: u64,
    },
    /// The next admission is scheduled for later
    NotDue { next_at: u64 },
    /// The registry is full
    AtCapacity,
    /// A contest is running and the pool is locked
    ContestInProgress,
}

impl Admission {
    /// Check if an entity was admitted
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Paces admissions into the registry.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    capacity: usize,
    config: AdmissionConfig,
    /// Earliest simulated time the next admission may happen
    next_at: u64,
}

impl AdmissionController {
    /// Create a controller whose first admission is due immediately
    pub fn new(capacity: usize, config: AdmissionConfig) -> Self {
        Self {
            capacity,
            config,
            next_at: 0,
        }
    }

    /// Maximum registry size
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// When the next admission is due
    #[inline]
    pub fn next_at(&self) -> u64 {
        self.next_at
    }

    /// Admit at most one entity.
    ///
    /// # Arguments
    ///
    /// * `now` - Current simulated time in milliseconds
    /// * `registry` - Registry that receives the entity
    /// * `rng` - Source for the rating and the next gap
    pub fn try_admit<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        registry: &mut Registry,
        rng: &mut R,
    ) -> Admission {
        if registry.len() >= self.capacity {
            return Admission::AtCapacity;
        }
        if now < self.next_at {
            return Admission::NotDue {
                next_at: self.next_at,
            };
        }

        let rating = rng.gen_range(self.config.rating_min..=self.config.rating_max);
        let key = registry.insert(rating);
        let entity = registry.entity_mut(key);
        entity.enqueue(now);
        let id = entity.id;

        let gap = rng.gen_range(self.config.min_gap_ms..=self.config.max_gap_ms);
        self.next_at = now.saturating_add(gap);

        Admission::Admitted {
            key,
            id,
            rating,
            next_at: self.next_at,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
