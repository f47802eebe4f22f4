//! Engine configuration.
//!
//! Every constant the engine uses is settable here, from code or from a TOML
//! file:
//!
//! ```toml
//! capacity = 16
//! team_size = 8
//! k_factor = 32.0
//! requeue_stagger_ms = 1
//! seed = 42
//! top_speed = 1.25
//!
//! [threshold]
//! min = 10
//! max = 100
//!
//! [admission]
//! min_gap_ms = 100
//! max_gap_ms = 500
//! rating_min = 1000.0
//! rating_max = 1100.0
//!
//! [contest]
//! step = 0.1
//! target_distance = 100.0
//! # steps_per_tick = 50
//!
//! [[speed_tiers]]
//! ceiling = 1050.0
//! speed = 1.0
//!
//! [rating_model]
//! kind = "elo"
//! scale = 400.0
//! ```
//!
//! Missing keys fall back to [`EngineConfig::default`]. Loading always
//! validates.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::rating::RatingModelConfig;
use crate::types::{SpeedTable, SpeedTier};

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of entities the registry admits
    pub capacity: usize,

    /// Members per team
    pub team_size: usize,

    /// Rating update K-factor
    pub k_factor: f64,

    /// Join-time offset (ms) per finishing position when re-queuing
    pub requeue_stagger_ms: u64,

    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,

    /// Speed for ratings above the last tier ceiling
    pub top_speed: f64,

    pub threshold: ThresholdConfig,

    pub admission: AdmissionConfig,

    pub contest: ContestConfig,

    /// Rating ceilings to speed, ascending
    pub speed_tiers: Vec<SpeedTier>,

    pub rating_model: RatingModelConfig,
}

/// Similarity window bounds. `max` is also the hard team-spread ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub min: u32,
    pub max: u32,
}

/// Admission pacing and initial rating range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    pub min_gap_ms: u64,
    pub max_gap_ms: u64,
    pub rating_min: f64,
    pub rating_max: f64,
}

/// Contest simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestConfig {
    /// Elapsed-time increment per simulation step
    pub step: f64,

    /// Distance a member must exceed to finish
    pub target_distance: f64,

    /// Steps per scheduler tick; `None` runs each contest to completion in
    /// the tick that formed it
    pub steps_per_tick: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            team_size: 8,
            k_factor: 32.0,
            requeue_stagger_ms: 1,
            seed: None,
            top_speed: 1.25,
            threshold: ThresholdConfig::default(),
            admission: AdmissionConfig::default(),
            contest: ContestConfig::default(),
            speed_tiers: vec![
                SpeedTier { ceiling: 1000.0, speed: 1.0 },
                SpeedTier { ceiling: 1050.0, speed: 1.05 },
                SpeedTier { ceiling: 1100.0, speed: 1.1 },
                SpeedTier { ceiling: 1150.0, speed: 1.15 },
                SpeedTier { ceiling: 1200.0, speed: 1.2 },
            ],
            rating_model: RatingModelConfig::default(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self { min: 10, max: 100 }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            min_gap_ms: 100,
            max_gap_ms: 500,
            rating_min: 1000.0,
            rating_max: 1100.0,
        }
    }
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            target_distance: 100.0,
            steps_per_tick: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.team_size < 2 {
            return Err(ConfigError::TeamTooSmall(self.team_size));
        }
        if self.capacity < self.team_size {
            return Err(ConfigError::CapacityBelowTeamSize {
                capacity: self.capacity,
                team_size: self.team_size,
            });
        }
        if self.threshold.min > self.threshold.max {
            return Err(ConfigError::InvertedThreshold {
                min: self.threshold.min,
                max: self.threshold.max,
            });
        }

        let admission = &self.admission;
        if admission.min_gap_ms > admission.max_gap_ms {
            return Err(ConfigError::InvertedAdmissionGap {
                min_ms: admission.min_gap_ms,
                max_ms: admission.max_gap_ms,
            });
        }
        if !(admission.rating_min.is_finite()
            && admission.rating_max.is_finite()
            && admission.rating_min <= admission.rating_max)
        {
            return Err(ConfigError::InvertedRatingRange {
                min: admission.rating_min,
                max: admission.rating_max,
            });
        }

        let contest = &self.contest;
        if !(contest.step.is_finite() && contest.step > 0.0) {
            return Err(ConfigError::NonPositiveStep(contest.step));
        }
        if !(contest.target_distance.is_finite() && contest.target_distance > 0.0) {
            return Err(ConfigError::NonPositiveTargetDistance(contest.target_distance));
        }
        if contest.steps_per_tick == Some(0) {
            return Err(ConfigError::ZeroStepsPerTick);
        }

        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return Err(ConfigError::InvalidKFactor(self.k_factor));
        }

        self.speed_table()?;
        self.rating_model.validate()
    }

    /// Build the validated speed table
    pub fn speed_table(&self) -> ConfigResult<SpeedTable> {
        SpeedTable::new(self.speed_tiers.clone(), self.top_speed)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_team_of_one() {
        let config = EngineConfig {
            team_size: 1,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TeamTooSmall(1))));
    }

    #[test]
    fn test_rejects_capacity_below_team_size() {
        let config = EngineConfig {
            capacity: 4,
            team_size: 8,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityBelowTeamSize { capacity: 4, team_size: 8 })
        ));
    }

    #[test]
    fn test_rejects_inverted_threshold() {
        let config = EngineConfig {
            threshold: ThresholdConfig { min: 50, max: 20 },
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedThreshold { min: 50, max: 20 })
        ));
    }

    #[test]
    fn test_rejects_inverted_admission_gap() {
        let mut config = EngineConfig::default();
        config.admission.min_gap_ms = 900;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedAdmissionGap { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_contest_parameters() {
        let mut config = EngineConfig::default();
        config.contest.step = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NonPositiveStep(_))));

        let mut config = EngineConfig::default();
        config.contest.target_distance = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveTargetDistance(_))
        ));

        let mut config = EngineConfig::default();
        config.contest.steps_per_tick = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroStepsPerTick)));
    }

    #[test]
    fn test_rejects_bad_k_factor() {
        let config = EngineConfig {
            k_factor: -4.0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidKFactor(_))));
    }

    #[test]
    fn test_parse_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            capacity = 32
            team_size = 4
            seed = 7

            [threshold]
            max = 250

            [contest]
            steps_per_tick = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.capacity, 32);
        assert_eq!(config.team_size, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.threshold.min, 10);
        assert_eq!(config.threshold.max, 250);
        assert_eq!(config.contest.steps_per_tick, Some(25));
        assert_eq!(config.contest.step, 0.1);
        assert_eq!(config.admission, AdmissionConfig::default());
    }

    #[test]
    fn test_parse_speed_tiers_and_model() {
        let config = EngineConfig::from_toml_str(
            r#"
            top_speed = 3.0

            [[speed_tiers]]
            ceiling = 900.0
            speed = 1.0

            [[speed_tiers]]
            ceiling = 1100.0
            speed = 2.0

            [rating_model]
            kind = "trueskill"
            beta = 200.0
            "#,
        )
        .unwrap();

        let table = config.speed_table().unwrap();
        assert_eq!(table.speed_for(1000.0), 2.0);
        assert_eq!(table.speed_for(1500.0), 3.0);
        assert_eq!(
            config.rating_model,
            RatingModelConfig::TrueSkill {
                beta: 200.0,
                sigma: crate::rating::trueskill::DEFAULT_SIGMA,
            }
        );
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let result = EngineConfig::from_toml_str("team_size = 1");
        assert!(matches!(result, Err(ConfigError::TeamTooSmall(1))));
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        let result = EngineConfig::from_toml_str("capacity = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EngineConfig::from_file(Path::new("/nonexistent/skill-queue.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
