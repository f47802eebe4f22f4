//! Entity registry implementation.
//!
//! ## Architecture
//!
//! - **Slab**: Pre-allocated entity storage, keyed by [`EntityKey`]
//! - **HashMap**: Entity ID to slab key mapping for O(1) lookup by ID
//!
//! Entities are never removed, so slab keys are never reused and iteration
//! order (the registry's natural order) is admission order.
//!
//! ## Example
//!
//! ```
//! use skill_queue::registry::Registry;
//!
//! let mut registry = Registry::with_capacity(16);
//!
//! let a = registry.insert(1000.0);
//! let b = registry.insert(1010.0);
//! registry.get_mut(a).unwrap().enqueue(5);
//! registry.get_mut(b).unwrap().enqueue(3);
//!
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.queued_count(), 2);
//! assert_eq!(registry.oldest_queued(), Some(b));
//! ```

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::types::{Entity, EntityId, EntityKey};

/// Sole owner of entity identity and mutable entity state.
#[derive(Debug)]
pub struct Registry {
    /// Entity storage
    /// Key: slab index, Value: Entity
    entities: Slab<Entity>,

    /// Entity ID to slab key mapping
    index: HashMap<EntityId, EntityKey>,

    /// Next entity ID (for auto-assignment)
    next_id: EntityId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entities: Slab::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a registry with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_id: 1,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of known entities
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the registry holds no entities
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Pre-allocated slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    // ========================================================================
    // Entity Management
    // ========================================================================

    /// Create a new `NotQueued` entity with the next free ID
    ///
    /// # Returns
    ///
    /// The slab key (handle) for the new entity
    pub fn insert(&mut self, rating: f64) -> EntityKey {
        let id = self.next_id;
        self.next_id += 1;

        let key = self.entities.insert(Entity::new(id, rating));
        self.index.insert(id, key);
        key
    }

    /// Get an entity by handle
    #[inline]
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable entity by handle
    #[inline]
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Get the handle for an entity ID
    #[inline]
    pub fn key_of(&self, id: EntityId) -> Option<EntityKey> {
        self.index.get(&id).copied()
    }

    /// Get an entity by ID
    pub fn get_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.key_of(id).and_then(|key| self.get(key))
    }

    /// Check if an entity ID is known
    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    /// Entity behind a handle that must exist
    ///
    /// # Panics
    ///
    /// Panics on a dangling handle. Handles come from this registry and
    /// entities are never removed, so a miss is a programming error.
    pub fn entity(&self, key: EntityKey) -> &Entity {
        self.entities
            .get(key)
            .unwrap_or_else(|| panic!("dangling entity handle {key}"))
    }

    /// Mutable entity behind a handle that must exist
    ///
    /// # Panics
    ///
    /// Panics on a dangling handle (see [`Registry::entity`]).
    pub fn entity_mut(&mut self, key: EntityKey) -> &mut Entity {
        self.entities
            .get_mut(key)
            .unwrap_or_else(|| panic!("dangling entity handle {key}"))
    }

    // ========================================================================
    // Pool Views
    // ========================================================================

    /// All entities in registry order
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Queued entities in registry order
    pub fn queued(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter().filter(|(_, entity)| entity.is_queued())
    }

    /// Number of queued entities
    pub fn queued_count(&self) -> usize {
        self.queued().count()
    }

    /// Number of entities in a running contest
    pub fn in_match_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.is_in_match())
            .count()
    }

    /// Queued entity with the oldest join timestamp.
    ///
    /// Ties go to the entity that comes first in registry order.
    pub fn oldest_queued(&self) -> Option<EntityKey> {
        self.queued()
            .min_by_key(|(key, entity)| (entity.joined_at, *key))
            .map(|(key, _)| key)
    }

    // ========================================================================
    // State Digest
    // ========================================================================

    /// SHA-256 digest of every entity's id, rating, status and join time,
    /// in registry order. Two runs with the same seed and tick sequence
    /// produce the same digest.
    pub fn state_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (_, entity) in self.entities.iter() {
            hasher.update(entity.id.to_le_bytes());
            hasher.update(entity.rating().to_bits().to_le_bytes());
            hasher.update([entity.status().to_u8()]);
            hasher.update(entity.joined_at.to_le_bytes());
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        digest
    }

    /// State digest as a hex string
    pub fn state_digest_hex(&self) -> String {
        hex::encode(self.state_digest())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
