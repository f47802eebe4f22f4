//! Rating model and rating updates.
//!
//! ## Components
//!
//! - [`RatingModel`]: expected-score oracle (stateless, swappable)
//! - [`Elo`]: logistic expected score, the default model
//! - [`trueskill`]: pairwise mean/uncertainty model, also usable as a [`RatingModel`]
//! - [`rank_scores`]: rank-to-score mapping for a finishing order
//! - [`RatingUpdater`]: applies `K * (actual - expected)` to a whole field at once
//!
//! ## Example
//!
//! ```
//! use skill_queue::rating::{Elo, RatingUpdater};
//! use skill_queue::registry::Registry;
//!
//! let mut registry = Registry::new();
//! let order: Vec<_> = [1000.0, 1020.0, 1040.0]
//!     .iter()
//!     .map(|&rating| registry.insert(rating))
//!     .collect();
//!
//! // Lowest rating finished first
//! let changes = RatingUpdater::new(32.0)
//!     .apply(&Elo::default(), &mut registry, &order)
//!     .unwrap();
//!
//! assert!(changes[0].delta > 0.0);
//! assert!(changes[2].delta < 0.0);
//! ```

pub mod model;
pub mod rank;
pub mod trueskill;
pub mod updater;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

pub use model::{Elo, RatingModel, DEFAULT_ELO_SCALE};
pub use rank::{rank_score, rank_scores};
pub use trueskill::{Skill, TrueSkill};
pub use updater::{RatingChange, RatingUpdater};

/// Rating model selection for the `[rating_model]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RatingModelConfig {
    /// Logistic Elo expected score
    Elo {
        #[serde(default = "default_elo_scale")]
        scale: f64,
    },
    /// TrueSkill-style win probability with a fixed uncertainty
    TrueSkill {
        #[serde(default = "default_beta")]
        beta: f64,
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
}

impl Default for RatingModelConfig {
    fn default() -> Self {
        RatingModelConfig::Elo {
            scale: DEFAULT_ELO_SCALE,
        }
    }
}

fn default_elo_scale() -> f64 {
    DEFAULT_ELO_SCALE
}

fn default_beta() -> f64 {
    trueskill::DEFAULT_BETA
}

fn default_sigma() -> f64 {
    trueskill::DEFAULT_SIGMA
}

impl RatingModelConfig {
    /// Check the model parameters
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidRatingModel(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        };

        match *self {
            RatingModelConfig::Elo { scale } => positive("elo scale", scale),
            RatingModelConfig::TrueSkill { beta, sigma } => {
                positive("trueskill beta", beta)?;
                positive("trueskill sigma", sigma)
            }
        }
    }

    /// Instantiate the configured model
    pub fn build(&self) -> Box<dyn RatingModel> {
        match *self {
            RatingModelConfig::Elo { scale } => Box::new(Elo::new(scale)),
            RatingModelConfig::TrueSkill { beta, sigma } => Box::new(TrueSkill::new(beta, sigma)),
        }
    }
}
