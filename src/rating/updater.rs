//! Rank-sensitive rating update.
//!
//! ## Update Rule
//!
//! For `n` finishers, best first:
//!
//! - actual score for rank `i`: `(n - i) / (n - 1)`
//! - expected score: mean pairwise expected score against the rest of the field
//! - delta: `K * (actual - expected)`
//!
//! Every delta is computed from one pre-update snapshot of the field before
//! any rating is written, so the result does not depend on the order the
//! finishers are processed in. Actual and expected scores both sum to
//! `n / 2`, so the deltas of one update sum to zero up to rounding.
//!
//! A field of one has no defined rank score; the update is skipped.

use crate::rating::model::RatingModel;
use crate::rating::rank::rank_scores;
use crate::registry::Registry;
use crate::types::{EntityId, EntityKey};

/// Rating change applied to one finisher
#[derive(Debug, Clone, PartialEq)]
pub struct RatingChange {
    /// Registry handle
    pub key: EntityKey,

    /// Entity ID
    pub id: EntityId,

    /// Finishing rank (1 = best)
    pub rank: usize,

    /// Rating before the update
    pub before: f64,

    /// Rating after the update
    pub after: f64,

    /// Rank score
    pub actual: f64,

    /// Mean expected score against the field
    pub expected: f64,

    /// `after - before`
    pub delta: f64,
}

/// Applies `K * (actual - expected)` to every finisher of a contest.
///
/// ## Example
///
/// ```
/// use skill_queue::rating::{Elo, RatingUpdater};
///
/// let updater = RatingUpdater::new(32.0);
///
/// // Equal ratings: winner gains exactly what the loser drops
/// let deltas = updater.compute_deltas(&Elo::default(), &[1000.0, 1000.0]).unwrap();
/// assert_eq!(deltas, vec![16.0, -16.0]);
///
/// // Nothing to rank against
/// assert!(updater.compute_deltas(&Elo::default(), &[1000.0]).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingUpdater {
    k_factor: f64,
}

impl RatingUpdater {
    pub fn new(k_factor: f64) -> Self {
        Self { k_factor }
    }

    #[inline]
    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    /// Deltas for a field given best-first ratings.
    ///
    /// Returns `None` for fewer than two finishers.
    pub fn compute_deltas<M: RatingModel + ?Sized>(
        &self,
        model: &M,
        ratings: &[f64],
    ) -> Option<Vec<f64>> {
        let scores = Self::field_scores(model, ratings)?;
        Some(
            scores
                .iter()
                .map(|&(actual, expected)| self.delta(actual, expected))
                .collect(),
        )
    }

    /// `(actual, expected)` per finisher of a best-first field
    fn field_scores<M: RatingModel + ?Sized>(
        model: &M,
        ratings: &[f64],
    ) -> Option<Vec<(f64, f64)>> {
        let actual = rank_scores(ratings.len())?;
        Some(
            actual
                .into_iter()
                .enumerate()
                .map(|(i, score)| (score, model.expected_against_field(i, ratings)))
                .collect(),
        )
    }

    #[inline]
    fn delta(&self, actual: f64, expected: f64) -> f64 {
        self.k_factor * (actual - expected)
    }

    /// Apply the update to the registry for a best-first finishing order.
    ///
    /// # Returns
    ///
    /// One [`RatingChange`] per finisher in finishing order, or `None` when
    /// the update was skipped (fewer than two finishers).
    pub fn apply<M: RatingModel + ?Sized>(
        &self,
        model: &M,
        registry: &mut Registry,
        order: &[EntityKey],
    ) -> Option<Vec<RatingChange>> {
        // Snapshot the whole field before touching any rating
        let snapshot: Vec<f64> = order
            .iter()
            .map(|&key| registry.entity(key).rating())
            .collect();

        let scores = Self::field_scores(model, &snapshot)?;

        let mut changes = Vec::with_capacity(order.len());
        for (i, (&key, &(actual, expected))) in order.iter().zip(&scores).enumerate() {
            let delta = self.delta(actual, expected);

            let entity = registry.entity_mut(key);
            entity.apply_rating_delta(delta);

            changes.push(RatingChange {
                key,
                id: entity.id,
                rank: i + 1,
                before: snapshot[i],
                after: entity.rating(),
                actual,
                expected,
                delta,
            });
        }

        Some(changes)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
