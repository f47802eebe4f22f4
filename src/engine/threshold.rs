//! Threshold controller: the adaptive similarity window.
//!
//! The threshold is the largest rating gap allowed between the anchor and a
//! teammate. It widens by one per failed matching tick, clamped to `max`,
//! and snaps back to `min` as soon as a team is accepted. Sitting at `max`
//! is not an error; matching simply keeps using the ceiling.

use crate::config::ThresholdConfig;

/// Owns the current threshold, always within `[min, max]`.
///
/// ## Example
///
/// ```
/// use skill_queue::engine::ThresholdController;
///
/// let mut threshold = ThresholdController::new(10, 12);
/// assert_eq!(threshold.current(), 10);
///
/// threshold.widen();
/// threshold.widen();
/// threshold.widen(); // clamped
/// assert_eq!(threshold.current(), 12);
/// assert!(threshold.is_saturated());
///
/// threshold.reset();
/// assert_eq!(threshold.current(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdController {
    min: u32,
    max: u32,
    current: u32,
}

impl ThresholdController {
    /// Create a controller starting at `min`
    ///
    /// # Panics
    ///
    /// Panics if `min > max`; configuration validation rejects that first.
    pub fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "threshold min {min} exceeds max {max}");
        Self {
            min,
            max,
            current: min,
        }
    }

    /// Create a controller from the `[threshold]` table
    pub fn from_config(config: &ThresholdConfig) -> Self {
        Self::new(config.min, config.max)
    }

    /// Current similarity window
    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Lower bound the window resets to
    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound of the window, also the hard ceiling on team spread
    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Check if the window reached its ceiling
    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.current == self.max
    }

    /// Widen by one, clamped to `max`. Returns true if the window changed.
    pub fn widen(&mut self) -> bool {
        if self.current < self.max {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Snap back to `min`
    pub fn reset(&mut self) {
        self.current = self.min;
    }
}
