//! Hydrated candidates and ranked results.

use super::score::ScoreBreakdown;
use crate::api::{Repo, UserProfile};
use crate::discovery::{DiscoveryPath, NotableRepo, Owner};
use serde::Serialize;

const EMAIL_MAX_CHARS: usize = 120;
const BLOG_MAX_CHARS: usize = 200;
const COMPANY_MAX_CHARS: usize = 120;
const LOCATION_MAX_CHARS: usize = 120;

/// Public contact fields, truncated for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Public email address.
    pub email: Option<String>,
    /// Personal site or blog URL.
    pub blog: Option<String>,
    /// Social profile URL (`https://x.com/<handle>`).
    pub social: Option<String>,
    /// Employer as written on the profile.
    pub company: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
}

impl Contact {
    /// Extracts contact fields from a profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            email: truncated(profile.email.as_deref(), EMAIL_MAX_CHARS),
            blog: truncated(profile.blog.as_deref(), BLOG_MAX_CHARS),
            social: profile
                .twitter_username
                .as_deref()
                .map(|handle| format!("https://x.com/{handle}")),
            company: truncated(profile.company.as_deref(), COMPANY_MAX_CHARS),
            location: truncated(profile.location.as_deref(), LOCATION_MAX_CHARS),
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.blog.is_none()
            && self.social.is_none()
            && self.company.is_none()
            && self.location.is_none()
    }

    /// One-line summary, e.g. `email: a@b.c | site: https://a.dev`.
    #[must_use]
    pub fn summary(&self) -> String {
        [
            ("email", &self.email),
            ("site", &self.blog),
            ("X", &self.social),
            ("company", &self.company),
            ("location", &self.location),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

fn truncated(value: Option<&str>, max_chars: usize) -> Option<String> {
    value.map(|v| v.chars().take(max_chars).collect())
}

/// A seed pool owner confirmed as an individual and hydrated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateProfile {
    /// GitHub login.
    pub login: String,
    /// Display name, if set on the profile.
    pub name: Option<String>,
    /// Profile URL.
    pub html_url: String,
    /// Account age in years at evaluation time.
    pub account_age_years: f64,
    /// Follower count.
    pub followers: u64,
    /// Public repo count reported by the profile.
    pub public_repos: u64,
    /// Public contact details.
    pub contact: Contact,

    /// Owned, non-fork, non-archived repos used for scoring, most stars first.
    pub repos: Vec<Repo>,

    /// Most used languages among `repos`.
    pub languages: Vec<String>,

    /// Repo that surfaced the candidate during discovery.
    pub notable_repo: NotableRepo,
    /// How discovery found the candidate.
    pub discovered_via: DiscoveryPath,
    /// Position in the seed pool, used to break score ties.
    pub discovery_order: usize,

    /// Stars across the repos matched during discovery.
    pub total_stars: u64,
}

impl CandidateProfile {
    pub(crate) fn new(
        owner: &Owner,
        profile: &UserProfile,
        account_age_years: f64,
        repos: Vec<Repo>,
        languages: Vec<String>,
    ) -> Self {
        Self {
            login: profile.login.clone(),
            name: profile.name.clone(),
            html_url: profile.html_url.clone(),
            account_age_years,
            followers: profile.followers,
            public_repos: profile.public_repos,
            contact: Contact::from_profile(profile),
            repos,
            languages,
            notable_repo: owner.notable_repo.clone(),
            discovered_via: owner.discovered_via,
            discovery_order: owner.discovery_order,
            total_stars: owner.total_stars,
        }
    }

    /// Display name, falling back to the login.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }

    /// Full names of the top `count` repos.
    #[must_use]
    pub fn top_repo_names(&self, count: usize) -> Vec<&str> {
        self.repos
            .iter()
            .take(count)
            .map(|r| r.full_name.as_str())
            .collect()
    }
}

/// A scored candidate with its final position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// 1-based rank.
    pub rank: usize,
    /// Hydrated profile.
    pub candidate: CandidateProfile,
    /// Score components and total.
    pub score: ScoreBreakdown,
}
