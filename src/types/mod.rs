//! Core data types for the matchmaking engine
//!
//! ## Types
//!
//! - [`Entity`]: A participant with rating, queue status and contest progress
//! - [`QueueStatus`]: `NotQueued`, `Queued` or `InMatch`
//! - [`ContestProgress`]: Distance and finish stamp for the current contest
//! - [`Team`]: Registry handles collected by one match attempt
//! - [`SpeedTable`]: Monotonic rating-to-speed step table
//!
//! ## Handles
//!
//! The registry owns every [`Entity`]. Everything else refers to entities by
//! [`EntityKey`] (a slab key) and reports them by [`EntityId`].

mod entity;
mod team;
pub mod speed;

// Re-export all types at module level
pub use entity::{ContestProgress, Entity, EntityId, EntityKey, QueueStatus};
pub use speed::{SpeedTable, SpeedTier};
pub use team::Team;
