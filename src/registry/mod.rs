//! Entity registry for the matchmaking engine.
//!
//! ## Architecture
//!
//! The registry is the single owner of every [`Entity`](crate::types::Entity):
//!
//! - **Slab-based storage**: O(1) lookup by handle, stable keys
//! - **ID index**: O(1) lookup by [`EntityId`](crate::types::EntityId)
//! - **Pool view**: the queued pool is a filtered view, not a second copy
//!
//! The Admission Controller appends, the Matchmaker reads and marks, the
//! Rating Updater mutates ratings and the scheduler re-queues, all through
//! the same registry.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert entity | O(1) |
//! | Lookup by handle | O(1) |
//! | Lookup by ID | O(1) |
//! | Oldest queued | O(n) |

mod store;

pub use store::Registry;
