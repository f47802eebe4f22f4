//! Error types for the matchmaking engine.
//!
//! Only configuration problems surface as `Err`. Running out of compatible
//! entities, rejected teams and a saturated threshold are routine outcomes
//! reported through [`crate::engine::MatchAttempt`] and
//! [`crate::engine::TickOutcome`], never through this module.

use thiserror::Error;

/// Fatal configuration errors, detected before the scheduler starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rank-score formula divides by `team_size - 1`.
    #[error("team size must be at least 2, got {0}")]
    TeamTooSmall(usize),

    #[error("capacity {capacity} is smaller than team size {team_size}")]
    CapacityBelowTeamSize { capacity: usize, team_size: usize },

    #[error("minimum threshold {min} exceeds maximum threshold {max}")]
    InvertedThreshold { min: u32, max: u32 },

    #[error("minimum admission gap {min_ms}ms exceeds maximum gap {max_ms}ms")]
    InvertedAdmissionGap { min_ms: u64, max_ms: u64 },

    #[error("initial rating range is empty or not finite: [{min}, {max}]")]
    InvertedRatingRange { min: f64, max: f64 },

    #[error("contest step must be positive and finite, got {0}")]
    NonPositiveStep(f64),

    #[error("contest target distance must be positive and finite, got {0}")]
    NonPositiveTargetDistance(f64),

    #[error("contest steps per tick must be at least 1")]
    ZeroStepsPerTick,

    #[error("invalid speed tiers: {0}")]
    InvalidSpeedTiers(String),

    #[error("K-factor must be positive and finite, got {0}")]
    InvalidKFactor(f64),

    #[error("invalid rating model parameters: {0}")]
    InvalidRatingModel(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
