//! Typed entities decoded from GitHub API responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Account type of a repository owner or contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// A personal account (`"User"` on the wire).
    Individual,
    /// An organization account.
    Organization,
    /// Bots, mannequins and anything else.
    Other,
}

impl AccountType {
    /// Maps the wire `type` field onto an [`AccountType`].
    #[must_use]
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "User" => Self::Individual,
            "Organization" => Self::Organization,
            _ => Self::Other,
        }
    }
}

/// A repository as returned by the search or repo-list endpoints.
///
/// Repos are never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repo {
    /// Owner login.
    pub owner: String,

    /// Owner account type.
    pub owner_type: AccountType,

    /// Repository name.
    pub name: String,

    /// Full name in "owner/name" format.
    pub full_name: String,

    /// Web URL of the repository.
    pub html_url: String,

    /// Stargazer count.
    pub stars: u64,

    /// Fork count.
    pub forks: u64,

    /// Open issue count.
    pub open_issues: u64,

    /// Whether this repository is a fork.
    pub is_fork: bool,

    /// Whether this repository is archived.
    pub is_archived: bool,

    /// Primary language.
    pub language: Option<String>,

    /// Last push, falling back to the last update or creation time.
    pub pushed_at: Option<DateTime<Utc>>,

    /// Description text.
    pub description: Option<String>,

    /// Topic tags.
    pub topics: Vec<String>,

    /// Name/description/topics mention tests.
    pub has_tests_hint: bool,

    /// Name/description/topics mention a CI system.
    pub has_ci_hint: bool,
}

impl Repo {
    /// Returns true if the repo may contribute to star weights or scores.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.is_fork && !self.is_archived
    }

    /// Whole days since the last push, `None` when the timestamp is unknown.
    #[must_use]
    pub fn days_since_push(&self, now: DateTime<Utc>) -> Option<i64> {
        self.pushed_at.map(|pushed| (now - pushed).num_days())
    }
}

/// A user or organization profile from the user endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    /// Login.
    pub login: String,

    /// Account type.
    pub account_type: AccountType,

    /// Display name.
    pub name: Option<String>,

    /// Profile URL.
    pub html_url: String,

    /// Account creation time.
    pub created_at: Option<DateTime<Utc>>,

    /// Follower count.
    pub followers: u64,

    /// Public repository count.
    pub public_repos: u64,

    /// Public email.
    pub email: Option<String>,

    /// Blog or personal site.
    pub blog: Option<String>,

    /// X/Twitter handle.
    pub twitter_username: Option<String>,

    /// Company.
    pub company: Option<String>,

    /// Location.
    pub location: Option<String>,
}

/// A contributor entry from the contributors endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    /// Contributor login.
    pub login: String,

    /// Contributor account type.
    pub account_type: AccountType,

    /// Number of contributions to the repository.
    pub contributions: u64,
}

/// A decoded list response.
///
/// Items that failed to decode are dropped and counted in `malformed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    /// Successfully decoded items, in response order.
    pub items: Vec<T>,

    /// Number of items skipped as malformed.
    pub malformed: usize,
}

impl<T> Listing<T> {
    /// Creates a listing without malformed entries.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            malformed: 0,
        }
    }

    /// Creates an empty listing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Records in the response, decoded or not.
    #[must_use]
    pub fn received(&self) -> usize {
        self.items.len() + self.malformed
    }
}
