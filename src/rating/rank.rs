//! Rank-to-score mapping.
//!
//! For `n` finishers ranked `1..=n` (rank 1 is best), the actual score for
//! rank `i` is `(n - i) / (n - 1)`: evenly spaced from 1.0 down to 0.0,
//! summing to `n / 2`. The mapping is undefined for a field of one.

/// Actual score for a 1-based `rank` in a field of `n`.
///
/// Returns `None` when `n < 2` or `rank` is outside `1..=n`.
///
/// # Example
///
/// ```
/// use skill_queue::rating::rank_score;
///
/// assert_eq!(rank_score(1, 5), Some(1.0));
/// assert_eq!(rank_score(3, 5), Some(0.5));
/// assert_eq!(rank_score(5, 5), Some(0.0));
/// assert_eq!(rank_score(1, 1), None);
/// ```
pub fn rank_score(rank: usize, n: usize) -> Option<f64> {
    if n < 2 || rank == 0 || rank > n {
        return None;
    }
    Some((n - rank) as f64 / (n - 1) as f64)
}

/// Actual scores for every rank of a field of `n`, best first.
pub fn rank_scores(n: usize) -> Option<Vec<f64>> {
    if n < 2 {
        return None;
    }
    (1..=n).map(|rank| rank_score(rank, n)).collect()
}
