//! Simplified TrueSkill-style pairwise skill model.
//!
//! Each participant's skill is a normal distribution with mean `mu` and
//! uncertainty `sigma`. A finishing order is treated as a set of pairwise
//! wins: every participant beats everyone ranked below them, and each pair is
//! updated in rank order.
//!
//! ```text
//! c = sqrt(2 beta^2 + sigma_w^2 + sigma_l^2)
//! t = (mu_w - mu_l) / c
//! mu_w += sigma_w^2 / c * v(t)
//! mu_l -= sigma_l^2 / c * v(t)
//! sigma = max(sqrt(sigma^2 * (1 - sigma^2 / c^2 * w(t))), min_sigma)
//! ```
//!
//! This is not a full factor-graph TrueSkill; draws and teams are not
//! modelled. [`TrueSkill`] also implements [`RatingModel`] so the
//! matchmaking engine can use its win probability instead of Elo's.

use crate::rating::model::RatingModel;

/// Default skill mean
pub const DEFAULT_MU: f64 = 25.0;

/// Default skill uncertainty
pub const DEFAULT_SIGMA: f64 = 8.333;

/// Default performance variation per game
pub const DEFAULT_BETA: f64 = 4.1667;

/// Lower bound on sigma after an update
pub const MIN_SIGMA: f64 = 1.0;

/// Below this CDF value `v(t)` falls back to `-t`
const V_EPSILON: f64 = 1e-10;

// ============================================================================
// Normal distribution helpers
// ============================================================================

/// Standard normal probability density
pub fn pdf(x: f64) -> f64 {
    (-x * x / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Standard normal cumulative distribution (polynomial approximation,
/// absolute error below 1e-7)
pub fn cdf(x: f64) -> f64 {
    let k = 1.0 / (1.0 + 0.231_641_9 * x.abs());
    let poly = k
        * (0.319_381_530
            + k * (-0.356_563_782 + k * (1.781_477_937 + k * (-1.821_255_978 + k * 1.330_274_429))));
    let approx = 1.0 - pdf(x) * poly;
    if x < 0.0 {
        1.0 - approx
    } else {
        approx
    }
}

/// Mean correction factor `pdf(t) / cdf(t)`
pub fn v(t: f64) -> f64 {
    let denom = cdf(t);
    if denom < V_EPSILON {
        -t
    } else {
        pdf(t) / denom
    }
}

/// Variance correction factor `v(t) * (v(t) + t)`
pub fn w(t: f64) -> f64 {
    let v = v(t);
    v * (v + t)
}

// ============================================================================
// Skill
// ============================================================================

/// A skill estimate: mean and uncertainty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skill {
    pub mu: f64,
    pub sigma: f64,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl Skill {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mu = {:.2}, sigma = {:.2}", self.mu, self.sigma)
    }
}

// ============================================================================
// TrueSkill model
// ============================================================================

/// Pairwise TrueSkill-style updater and win-probability model.
///
/// ## Example
///
/// ```
/// use skill_queue::rating::trueskill::{Skill, TrueSkill};
///
/// let model = TrueSkill::default();
/// let mut winner = Skill::default();
/// let mut loser = Skill::default();
///
/// model.update_pair(&mut winner, &mut loser);
///
/// assert!(winner.mu > 25.0);
/// assert!(loser.mu < 25.0);
/// assert!(winner.sigma < 8.333);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueSkill {
    /// Performance variation per game
    pub beta: f64,

    /// Uncertainty assumed for plain ratings in [`RatingModel::expected_score`]
    pub sigma: f64,

    /// Lower bound on sigma after an update
    pub min_sigma: f64,
}

impl Default for TrueSkill {
    fn default() -> Self {
        Self {
            beta: DEFAULT_BETA,
            sigma: DEFAULT_SIGMA,
            min_sigma: MIN_SIGMA,
        }
    }
}

impl TrueSkill {
    pub fn new(beta: f64, sigma: f64) -> Self {
        Self {
            beta,
            sigma,
            min_sigma: MIN_SIGMA,
        }
    }

    /// Combined uncertainty of a pairing
    pub fn uncertainty(&self, a: &Skill, b: &Skill) -> f64 {
        (2.0 * self.beta * self.beta + a.sigma * a.sigma + b.sigma * b.sigma).sqrt()
    }

    /// Normalised mean difference `(a.mu - b.mu) / c`
    pub fn mean_difference(&self, a: &Skill, b: &Skill, c: f64) -> f64 {
        (a.mu - b.mu) / c
    }

    /// Match quality of a pairing: 1.0 for identical certain skills,
    /// falling toward 0 as the means drift apart.
    pub fn match_quality(&self, a: &Skill, b: &Skill) -> f64 {
        let c = self.uncertainty(a, b);
        let t = self.mean_difference(a, b, c);
        (-t * t / 2.0).exp() * (2.0 * self.beta * self.beta / (c * c)).sqrt()
    }

    /// Update both skills after `winner` beat `loser`
    pub fn update_pair(&self, winner: &mut Skill, loser: &mut Skill) {
        let c = self.uncertainty(winner, loser);
        let t = self.mean_difference(winner, loser, c);
        let v = v(t);
        let w = w(t);

        winner.mu += winner.sigma * winner.sigma / c * v;
        loser.mu -= loser.sigma * loser.sigma / c * v;

        winner.sigma = self.shrink_sigma(winner.sigma, c, w);
        loser.sigma = self.shrink_sigma(loser.sigma, c, w);
    }

    /// Update a best-first finishing order: every skill beats all skills
    /// ranked below it, applied pairwise in rank order.
    pub fn update_ranking(&self, ranking: &mut [Skill]) {
        for i in 0..ranking.len() {
            for j in (i + 1)..ranking.len() {
                let (head, tail) = ranking.split_at_mut(j);
                self.update_pair(&mut head[i], &mut tail[0]);
            }
        }
    }

    fn shrink_sigma(&self, sigma: f64, c: f64, w: f64) -> f64 {
        let variance = sigma * sigma;
        (variance * (1.0 - variance / (c * c) * w))
            .sqrt()
            .max(self.min_sigma)
    }
}

impl RatingModel for TrueSkill {
    fn expected_score(&self, rating: f64, opponent: f64) -> f64 {
        let c = (2.0 * self.beta * self.beta + 2.0 * self.sigma * self.sigma).sqrt();
        cdf((rating - opponent) / c)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
