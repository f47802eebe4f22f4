//! Matchmaking engine.
//!
//! ## Components
//!
//! - [`AdmissionController`]: paced, randomized growth of the pool up to capacity
//! - [`ThresholdController`]: similarity window that widens while waiting
//! - [`Matchmaker`]: anchor selection, greedy collection, spread validation
//! - [`Contest`]: fixed-step race producing a finishing order
//! - [`Scheduler`]: per-tick state machine tying the above together
//!
//! ## Data Flow
//!
//! ```text
//! admission -> registry (Queued) -> matchmaker -> team (InMatch)
//!     -> contest -> standings -> rating update -> re-queue (Queued)
//! ```
//!
//! Everything runs on the caller's thread, one tick at a time. At most one
//! contest is in flight, and no team forms while it runs.

pub mod admission;
pub mod contest;
pub mod matchmaker;
pub mod scheduler;
pub mod threshold;

pub use admission::{Admission, AdmissionController};
pub use contest::{Contest, Standing};
pub use matchmaker::{team_spread, MatchAttempt, MatchFailure, Matchmaker};
pub use scheduler::{ContestSummary, Scheduler, SchedulerContext, SchedulerStats, TickOutcome};
pub use threshold::ThresholdController;
