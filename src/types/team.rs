//! Team: the working set for one match attempt.
//!
//! A team is rebuilt fresh on every matchmaking attempt and never persisted.
//! It stores registry handles in insertion order; the first member is always
//! the anchor.

use crate::types::entity::EntityKey;

/// An ordered collection of up to `size` registry handles.
///
/// ## Example
///
/// ```
/// use skill_queue::types::Team;
///
/// let mut team = Team::new(2);
/// assert!(team.push(4));
/// assert!(!team.push(4)); // duplicates are skipped
/// assert!(team.push(9));
/// assert!(team.is_full());
/// assert!(!team.push(11)); // full
///
/// assert_eq!(team.anchor(), Some(4));
/// assert_eq!(team.members(), &[4, 9]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    members: Vec<EntityKey>,
    size: usize,
}

impl Team {
    /// Create an empty team with room for `size` members
    pub fn new(size: usize) -> Self {
        Self {
            members: Vec::with_capacity(size),
            size,
        }
    }

    /// Add a member. Returns false if the team is full or already holds it.
    pub fn push(&mut self, key: EntityKey) -> bool {
        if self.is_full() || self.contains(key) {
            return false;
        }
        self.members.push(key);
        true
    }

    /// Check if a handle is already on the team
    #[inline]
    pub fn contains(&self, key: EntityKey) -> bool {
        self.members.contains(&key)
    }

    /// The anchor (first member)
    #[inline]
    pub fn anchor(&self) -> Option<EntityKey> {
        self.members.first().copied()
    }

    /// Members in insertion order
    #[inline]
    pub fn members(&self) -> &[EntityKey] {
        &self.members
    }

    /// Number of members collected so far
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if no members were collected
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Target team size
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if the team reached its target size
    #[inline]
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.size
    }
}
