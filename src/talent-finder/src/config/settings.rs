//! Run settings deserialization and validation.

use super::{ConfigError, InactivityWindow, MAX_INACTIVE_DAYS};
use crate::discovery::DiscoveryLimits;
use crate::query::QuerySettings;
use crate::ranking::{RankingPolicy, ScoringWeights};
use serde::Deserialize;
use url::Url;

/// Settings for a discovery-and-ranking run, read from a TOML file.
///
/// Every key is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FinderConfig {
    /// Seed pool budget.
    pub seed_pool: usize,

    /// Size of the final ranked list.
    pub max_candidates: usize,

    /// Minimum account age in years.
    pub min_years: f64,

    /// Recency threshold for candidates and the search `pushed:` qualifier.
    pub max_inactive_days: InactivityWindow,

    /// Minimum stars for searched repos.
    pub min_stars: u32,

    /// Search pages fetched per query.
    pub pages_per_query: u32,

    /// Results per search page.
    pub per_page: u8,

    /// Maximum number of queries issued, unlimited when unset.
    pub max_queries: Option<usize>,

    /// Contributors fetched per organization repo.
    pub contributors_per_repo: u8,

    /// Ceiling on owners added through organization contributors.
    /// Defaults to the seed pool budget.
    pub contributor_cap: Option<usize>,

    /// GitHub API base URL, for GitHub Enterprise.
    pub api_base_url: Option<String>,

    /// Scoring weights.
    pub scoring: ScoringWeights,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            seed_pool: 120,
            max_candidates: 10,
            min_years: 1.0,
            max_inactive_days: InactivityWindow::default(),
            min_stars: 20,
            pages_per_query: 3,
            per_page: 50,
            max_queries: None,
            contributors_per_repo: 3,
            contributor_cap: None,
            api_base_url: None,
            scoring: ScoringWeights::default(),
        }
    }
}

impl FinderConfig {
    /// Validates ranges and consistency. `path` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.to_string(),
            message,
        };

        if self.seed_pool == 0 {
            return Err(invalid("seed-pool must be at least 1".to_string()));
        }
        if self.max_candidates == 0 {
            return Err(invalid("max-candidates must be at least 1".to_string()));
        }
        if !self.min_years.is_finite() || self.min_years < 0.0 {
            return Err(invalid(format!(
                "min-years must be a non-negative number, got {}",
                self.min_years
            )));
        }
        if let Some(days) = self.max_inactive_days.days() {
            if days > MAX_INACTIVE_DAYS {
                return Err(invalid(format!(
                    "max-inactive-days must be at most {MAX_INACTIVE_DAYS}, got {days}"
                )));
            }
        }
        if self.pages_per_query == 0 {
            return Err(invalid("pages-per-query must be at least 1".to_string()));
        }
        if !(1..=100).contains(&self.per_page) {
            return Err(invalid(format!(
                "per-page must be between 1 and 100, got {}",
                self.per_page
            )));
        }
        if !(1..=100).contains(&self.contributors_per_repo) {
            return Err(invalid(format!(
                "contributors-per-repo must be between 1 and 100, got {}",
                self.contributors_per_repo
            )));
        }
        if self.max_queries == Some(0) {
            return Err(invalid("max-queries must be at least 1 when set".to_string()));
        }
        if let Some(base) = &self.api_base_url {
            Url::parse(base).map_err(|e| invalid(format!("api-base-url '{base}': {e}")))?;
        }
        self.scoring.validate().map_err(invalid)?;
        Ok(())
    }

    /// Parsed API base URL, if one is configured and valid.
    #[must_use]
    pub fn api_base_url(&self) -> Option<Url> {
        self.api_base_url
            .as_deref()
            .and_then(|base| Url::parse(base).ok())
    }

    /// Query building settings.
    #[must_use]
    pub fn query_settings(&self) -> QuerySettings {
        QuerySettings {
            min_stars: self.min_stars,
            pushed_within_days: self.max_inactive_days.search_window_days(),
            max_queries: self.max_queries,
        }
    }

    /// Discovery budgets.
    #[must_use]
    pub fn discovery_limits(&self) -> DiscoveryLimits {
        DiscoveryLimits {
            seed_pool: self.seed_pool,
            pages_per_query: self.pages_per_query,
            per_page: self.per_page,
            contributors_per_repo: self.contributors_per_repo,
            contributor_cap: self.contributor_cap.unwrap_or(self.seed_pool),
        }
    }

    /// Eligibility and scoring policy.
    #[must_use]
    pub fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy {
            max_candidates: self.max_candidates,
            min_years: self.min_years,
            max_inactive_days: self.max_inactive_days.days(),
            weights: self.scoring.clone(),
        }
    }
}
