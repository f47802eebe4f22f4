//! Rating model collaborator.
//!
//! The matchmaking engine only asks a rating model one question: what score
//! should `rating` expect against `opponent`? Anything that answers it with
//! a probability in `[0, 1]` can be swapped in.

/// Expected-score oracle used by the [`RatingUpdater`](super::RatingUpdater).
pub trait RatingModel: Send + Sync {
    /// Probability that `rating` beats `opponent`, in `[0, 1]`.
    ///
    /// Implementations must be symmetric:
    /// `expected_score(a, b) + expected_score(b, a) == 1`.
    fn expected_score(&self, rating: f64, opponent: f64) -> f64;

    /// Mean expected score of `ratings[index]` against every other rating
    /// in the field.
    ///
    /// Returns 0.5 for a field of one, where there is nobody to play.
    fn expected_against_field(&self, index: usize, ratings: &[f64]) -> f64 {
        if ratings.len() < 2 {
            return 0.5;
        }

        let rating = ratings[index];
        let total: f64 = ratings
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, &opponent)| self.expected_score(rating, opponent))
            .sum();

        total / (ratings.len() - 1) as f64
    }
}

/// Default logistic scale: a 400-point gap means 10:1 odds
pub const DEFAULT_ELO_SCALE: f64 = 400.0;

/// Logistic (Elo) expected-score model:
/// `1 / (1 + 10^((opponent - rating) / scale))`.
///
/// ## Example
///
/// ```
/// use skill_queue::rating::{Elo, RatingModel};
///
/// let elo = Elo::default();
/// assert!((elo.expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);
/// assert!(elo.expected_score(1800.0, 1500.0) > 0.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elo {
    /// Rating gap that corresponds to 10:1 odds
    pub scale: f64,
}

impl Default for Elo {
    fn default() -> Self {
        Self {
            scale: DEFAULT_ELO_SCALE,
        }
    }
}

impl Elo {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl RatingModel for Elo {
    fn expected_score(&self, rating: f64, opponent: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent - rating) / self.scale))
    }
}
