//! # Skill Queue
//!
//! Skill-based matchmaking queue engine.
//!
//! ## Architecture
//!
//! - **Types**: Entity, queue status, teams, speed tiers
//! - **Registry**: slab-backed entity store with a state digest
//! - **Rating**: Elo and TrueSkill-style models, rank-sensitive updates
//! - **Engine**: admission, adaptive threshold, matchmaker, contest, scheduler
//! - **Events**: structured output through an [`EventSink`]
//!
//! ## Design Principles
//!
//! 1. **Determinism**: a fixed seed and tick sequence reproduce the same registry state
//! 2. **Cooperative Ticks**: the driver owns the clock; the core never sleeps
//! 3. **Exclusive Contests**: at most one contest runs, and no team forms meanwhile
//! 4. **Simultaneous Updates**: rating deltas come from one pre-update snapshot
//!
//! ## Example
//!
//! ```
//! use skill_queue::{EngineConfig, Event, Scheduler};
//!
//! let config = EngineConfig {
//!     capacity: 8,
//!     team_size: 4,
//!     seed: Some(42),
//!     ..EngineConfig::default()
//! };
//!
//! let mut scheduler = Scheduler::new(config, Vec::<Event>::new()).unwrap();
//! for now in (0..60_000).step_by(25) {
//!     scheduler.tick(now);
//! }
//!
//! let registry = &scheduler.context().registry;
//! assert_eq!(registry.len(), 8);
//! assert_eq!(registry.in_match_count(), 0);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Entity, Team, SpeedTable
pub mod types;

/// Entity registry: slab-based storage with an id index
pub mod registry;

/// Rating models and the rank-sensitive updater
pub mod rating;

/// Matchmaking engine: admission, threshold, matchmaker, contest, scheduler
pub mod engine;

/// Structured events and sinks
pub mod events;

/// Engine configuration
pub mod config;

/// Configuration errors
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::{Matchmaker, Scheduler, SchedulerStats, TickOutcome};
pub use error::{ConfigError, ConfigResult};
pub use events::{Event, EventSink, TracingSink};
pub use registry::Registry;
pub use types::{Entity, EntityId, QueueStatus, Team};
