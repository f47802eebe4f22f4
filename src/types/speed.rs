//! Rating-to-speed step table.
//!
//! A contest speed is a monotonic step function of rating: each tier covers
//! ratings up to and including its `ceiling`, and ratings above the last
//! ceiling run at `top_speed`.
//!
//! ## Example
//!
//! ```
//! use skill_queue::types::{SpeedTable, SpeedTier};
//!
//! let table = SpeedTable::new(
//!     vec![
//!         SpeedTier { ceiling: 1000.0, speed: 1.0 },
//!         SpeedTier { ceiling: 1200.0, speed: 1.5 },
//!     ],
//!     2.0,
//! )
//! .unwrap();
//!
//! assert_eq!(table.speed_for(900.0), 1.0);
//! assert_eq!(table.speed_for(1000.0), 1.0);
//! assert_eq!(table.speed_for(1000.5), 1.5);
//! assert_eq!(table.speed_for(5000.0), 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// One step of the speed table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTier {
    /// Highest rating (inclusive) covered by this tier
    pub ceiling: f64,
    /// Speed for ratings in this tier
    pub speed: f64,
}

/// Validated, ascending speed table
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    tiers: Vec<SpeedTier>,
    top_speed: f64,
}

impl SpeedTable {
    /// Build a table, checking that it is monotonic.
    ///
    /// Ceilings must be finite and strictly increasing; speeds must be
    /// positive, finite and non-decreasing, with `top_speed` at least the
    /// last tier's speed.
    pub fn new(tiers: Vec<SpeedTier>, top_speed: f64) -> ConfigResult<Self> {
        if !(top_speed.is_finite() && top_speed > 0.0) {
            return Err(ConfigError::InvalidSpeedTiers(format!(
                "top speed must be positive, got {top_speed}"
            )));
        }

        let mut previous: Option<SpeedTier> = None;
        for tier in &tiers {
            if !tier.ceiling.is_finite() {
                return Err(ConfigError::InvalidSpeedTiers(format!(
                    "ceiling {} is not finite",
                    tier.ceiling
                )));
            }
            if !(tier.speed.is_finite() && tier.speed > 0.0) {
                return Err(ConfigError::InvalidSpeedTiers(format!(
                    "speed {} for ceiling {} must be positive",
                    tier.speed, tier.ceiling
                )));
            }
            if let Some(prev) = previous {
                if tier.ceiling <= prev.ceiling {
                    return Err(ConfigError::InvalidSpeedTiers(format!(
                        "ceilings must increase: {} follows {}",
                        tier.ceiling, prev.ceiling
                    )));
                }
                if tier.speed < prev.speed {
                    return Err(ConfigError::InvalidSpeedTiers(format!(
                        "speeds must not decrease: {} follows {}",
                        tier.speed, prev.speed
                    )));
                }
            }
            previous = Some(*tier);
        }

        if let Some(last) = previous {
            if top_speed < last.speed {
                return Err(ConfigError::InvalidSpeedTiers(format!(
                    "top speed {top_speed} is below last tier speed {}",
                    last.speed
                )));
            }
        }

        Ok(Self { tiers, top_speed })
    }

    /// Speed for a rating
    pub fn speed_for(&self, rating: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| rating <= tier.ceiling)
            .map_or(self.top_speed, |tier| tier.speed)
    }

    /// The configured tiers, ascending
    pub fn tiers(&self) -> &[SpeedTier] {
        &self.tiers
    }

    /// Speed above the last ceiling
    pub fn top_speed(&self) -> f64 {
        self.top_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(ceiling: f64, speed: f64) -> SpeedTier {
        SpeedTier { ceiling, speed }
    }

    #[test]
    fn test_empty_table_uses_top_speed() {
        let table = SpeedTable::new(Vec::new(), 1.25).unwrap();
        assert_eq!(table.speed_for(0.0), 1.25);
        assert_eq!(table.speed_for(3000.0), 1.25);
    }

    #[test]
    fn test_speed_is_monotonic_in_rating() {
        let table = SpeedTable::new(
            vec![tier(1000.0, 1.0), tier(1100.0, 1.1), tier(1200.0, 1.2)],
            1.3,
        )
        .unwrap();

        let mut last = 0.0;
        for rating in (800..1400).step_by(10) {
            let speed = table.speed_for(rating as f64);
            assert!(speed >= last, "speed dropped at rating {rating}");
            last = speed;
        }
    }

    #[test]
    fn test_rejects_unsorted_ceilings() {
        let result = SpeedTable::new(vec![tier(1100.0, 1.0), tier(1000.0, 1.1)], 1.2);
        assert!(matches!(result, Err(ConfigError::InvalidSpeedTiers(_))));
    }

    #[test]
    fn test_rejects_decreasing_speeds() {
        let result = SpeedTable::new(vec![tier(1000.0, 1.5), tier(1100.0, 1.0)], 2.0);
        assert!(matches!(result, Err(ConfigError::InvalidSpeedTiers(_))));
    }

    #[test]
    fn test_rejects_top_speed_below_last_tier() {
        let result = SpeedTable::new(vec![tier(1000.0, 1.5)], 1.0);
        assert!(matches!(result, Err(ConfigError::InvalidSpeedTiers(_))));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let result = SpeedTable::new(vec![tier(1000.0, 0.0)], 1.0);
        assert!(matches!(result, Err(ConfigError::InvalidSpeedTiers(_))));
    }
}
