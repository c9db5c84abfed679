//! Scoring weights and heuristic constants.
//!
//! The five component weights sum to 1.0; the seed-repo bonus is added on
//! top of the weighted sum.

use serde::Deserialize;

pub const LANGUAGE_OVERLAP_WEIGHT: f64 = 0.30;
pub const REPO_QUALITY_WEIGHT: f64 = 0.28;
pub const ACTIVITY_RECENCY_WEIGHT: f64 = 0.17;
pub const FOLLOWERS_WEIGHT: f64 = 0.15;
pub const TOP_REPO_WEIGHT: f64 = 0.10;

/// Flat bonus when the discovering repo is popular.
pub const SEED_REPO_BONUS: f64 = 0.05;

/// Star count at which the seed-repo bonus applies.
pub const SEED_REPO_BONUS_MIN_STARS: u64 = 500;

/// Owned repos considered per candidate.
pub const TOP_REPO_LIMIT: usize = 10;

/// Repos averaged into the top-repo bonus.
pub const TOP_REPO_BONUS_COUNT: usize = 3;

/// Languages kept per candidate.
pub const CANDIDATE_LANGUAGE_LIMIT: usize = 8;

/// Language overlap when the profile names no languages.
pub const NO_LANGUAGE_BASELINE: f64 = 0.2;

/// Follower count that saturates the follower score.
pub const FOLLOWER_SATURATION: f64 = 1000.0;

/// Pushes within this many days earn full activity credit.
pub const ACTIVITY_FULL_CREDIT_DAYS: i64 = 30;

/// Pushes older than this many days earn no activity credit.
pub const ACTIVITY_HORIZON_DAYS: i64 = 90;

/// A repo pushed within this many days counts as recently active.
pub const REPO_ACTIVE_DAYS: i64 = 90;

/// Tolerance when checking that weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Tunable scoring weights (the `[scoring]` table of the config file).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ScoringWeights {
    /// Weight of the language overlap component.
    pub language_overlap: f64,
    /// Weight of the repo quality component.
    pub repo_quality: f64,
    /// Weight of the activity recency component.
    pub activity_recency: f64,
    /// Weight of the follower component.
    pub followers: f64,
    /// Weight of the top-repo component.
    pub top_repo: f64,
    /// Flat bonus added on top of the weighted sum.
    pub seed_repo_bonus: f64,
    /// Stars the discovering repo needs for the bonus to apply.
    pub seed_repo_bonus_min_stars: u64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            language_overlap: LANGUAGE_OVERLAP_WEIGHT,
            repo_quality: REPO_QUALITY_WEIGHT,
            activity_recency: ACTIVITY_RECENCY_WEIGHT,
            followers: FOLLOWERS_WEIGHT,
            top_repo: TOP_REPO_WEIGHT,
            seed_repo_bonus: SEED_REPO_BONUS,
            seed_repo_bonus_min_stars: SEED_REPO_BONUS_MIN_STARS,
        }
    }
}

impl ScoringWeights {
    fn components(&self) -> [f64; 5] {
        [
            self.language_overlap,
            self.repo_quality,
            self.activity_recency,
            self.followers,
            self.top_repo,
        ]
    }

    /// Sum of the five component weights.
    #[must_use]
    pub fn component_sum(&self) -> f64 {
        self.components().iter().sum()
    }

    /// Checks that weights are finite, non-negative and sum to one.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let all = self.components();
        if all
            .iter()
            .chain(std::iter::once(&self.seed_repo_bonus))
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err("scoring weights must be finite and non-negative".to_string());
        }
        let sum = self.component_sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("scoring weights must sum to 1.0, got {sum:.6}"));
        }
        Ok(())
    }

    /// Bonus earned by a candidate whose discovering repo has `seed_stars`.
    #[must_use]
    pub fn seed_bonus(&self, seed_stars: u64) -> f64 {
        if seed_stars >= self.seed_repo_bonus_min_stars {
            self.seed_repo_bonus
        } else {
            0.0
        }
    }
}
