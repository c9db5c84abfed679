//! Provisional owner records accumulated during discovery.

use crate::api::{AccountType, Repo};
use serde::Serialize;

/// Highest per-repo star weight.
const MAX_REPO_STAR_WEIGHT: u64 = 5;

/// Star weight a single repo contributes to its owner: `1 + min(5, stars / 1000)`.
#[must_use]
pub fn repo_star_weight(stars: u64) -> u64 {
    1 + (stars / 1000).min(MAX_REPO_STAR_WEIGHT)
}

/// How an owner entered the seed pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryPath {
    /// Owns a repo returned by search.
    OwnedRepo,
    /// Top contributor of an organization repo returned by search.
    OrgContributor,
}

impl DiscoveryPath {
    /// Human readable label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OwnedRepo => "owned repo",
            Self::OrgContributor => "org contributor",
        }
    }
}

/// The repo through which an owner was best discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotableRepo {
    /// Full name in "owner/name" format.
    pub full_name: String,

    /// Web URL.
    pub html_url: String,

    /// Stargazer count at discovery time.
    pub stars: u64,
}

impl From<&Repo> for NotableRepo {
    fn from(repo: &Repo) -> Self {
        Self {
            full_name: repo.full_name.clone(),
            html_url: repo.html_url.clone(),
            stars: repo.stars,
        }
    }
}

/// A login found during discovery, not yet hydrated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Owner {
    /// Login as first seen.
    pub login: String,

    /// Account type as reported by search or the contributors endpoint.
    pub account_type: AccountType,

    /// Highest-star repo seen for this owner; ties keep the first.
    pub notable_repo: NotableRepo,

    /// How the owner was first found.
    pub discovered_via: DiscoveryPath,

    /// Position in the seed pool; lower means discovered earlier.
    pub discovery_order: usize,

    /// Sum of [`repo_star_weight`] over distinct contributing repos.
    pub star_weight: u64,

    /// Sum of raw star counts over distinct contributing repos.
    pub total_stars: u64,

    /// Full names of the contributing repos, in the order seen.
    pub repos: Vec<String>,
}

impl Owner {
    pub(crate) fn new(login: &str, repo: &Repo, path: DiscoveryPath, discovery_order: usize) -> Self {
        Self {
            login: login.to_string(),
            account_type: AccountType::Individual,
            notable_repo: NotableRepo::from(repo),
            discovered_via: path,
            discovery_order,
            star_weight: repo_star_weight(repo.stars),
            total_stars: repo.stars,
            repos: vec![repo.full_name.clone()],
        }
    }

    /// Folds another repo into this owner. Returns false if the repo was
    /// already counted.
    pub(crate) fn absorb(&mut self, repo: &Repo) -> bool {
        if self
            .repos
            .iter()
            .any(|seen| seen.eq_ignore_ascii_case(&repo.full_name))
        {
            return false;
        }

        self.star_weight += repo_star_weight(repo.stars);
        self.total_stars += repo.stars;
        self.repos.push(repo.full_name.clone());
        if repo.stars > self.notable_repo.stars {
            self.notable_repo = NotableRepo::from(repo);
        }
        true
    }
}
