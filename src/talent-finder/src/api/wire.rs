//! JSON wire shapes and their conversion into domain types.
//!
//! List responses are decoded item by item so a single malformed record is
//! skipped instead of failing the whole page.

use super::error::ApiError;
use super::models::{AccountType, Contributor, Listing, Repo, UserProfile};
use crate::requirements::TermMatcher;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static TEST_HINTS: LazyLock<TermMatcher> =
    LazyLock::new(|| TermMatcher::new(["test", "tests", "testing"]));

static CI_HINTS: LazyLock<TermMatcher> =
    LazyLock::new(|| TermMatcher::new(["ci", "github actions", "travis", "circleci"]));

#[derive(Debug, Deserialize)]
pub(crate) struct WireAccount {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireRepo {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub owner: WireAccount,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    pub language: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl From<WireRepo> for Repo {
    fn from(wire: WireRepo) -> Self {
        let hint_text = format!(
            "{} {} {}",
            wire.description.as_deref().unwrap_or_default(),
            wire.name,
            wire.topics.join(" ")
        );
        Repo {
            owner_type: AccountType::from_wire(&wire.owner.kind),
            owner: wire.owner.login,
            has_tests_hint: TEST_HINTS.is_match(&hint_text),
            has_ci_hint: CI_HINTS.is_match(&hint_text),
            name: wire.name,
            full_name: wire.full_name,
            html_url: wire.html_url,
            stars: wire.stargazers_count,
            forks: wire.forks_count,
            open_issues: wire.open_issues_count,
            is_fork: wire.fork,
            is_archived: wire.archived,
            language: wire.language.filter(|lang| !lang.is_empty()),
            pushed_at: wire.pushed_at.or(wire.updated_at).or(wire.created_at),
            description: wire.description,
            topics: wire.topics,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub name: Option<String>,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub public_repos: u64,
    pub email: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl From<WireUser> for UserProfile {
    fn from(wire: WireUser) -> Self {
        UserProfile {
            login: wire.login,
            account_type: AccountType::from_wire(&wire.kind),
            name: non_empty(wire.name),
            html_url: wire.html_url,
            created_at: wire.created_at,
            followers: wire.followers,
            public_repos: wire.public_repos,
            email: non_empty(wire.email),
            blog: non_empty(wire.blog),
            twitter_username: non_empty(wire.twitter_username),
            company: non_empty(wire.company),
            location: non_empty(wire.location),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireContributor {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub contributions: u64,
}

impl From<WireContributor> for Contributor {
    fn from(wire: WireContributor) -> Self {
        Contributor {
            login: wire.login,
            account_type: AccountType::from_wire(&wire.kind),
            contributions: wire.contributions,
        }
    }
}

/// Search endpoint envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct WireSearchPage {
    #[serde(default)]
    pub items: Vec<Value>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Decodes each array element into `W`, converting into `T` and counting failures.
pub(crate) fn decode_listing<W, T>(items: Vec<Value>) -> Listing<T>
where
    W: DeserializeOwned,
    T: From<W>,
{
    let mut listing = Listing::empty();
    for item in items {
        match serde_json::from_value::<W>(item) {
            Ok(wire) => listing.items.push(T::from(wire)),
            Err(e) => {
                debug!(error = %e, "Skipping malformed record");
                listing.malformed += 1;
            }
        }
    }
    listing
}

/// Decodes a single object response.
pub(crate) fn decode_one<W, T>(operation: &str, value: Value) -> Result<T, ApiError>
where
    W: DeserializeOwned,
    T: From<W>,
{
    serde_json::from_value::<W>(value)
        .map(T::from)
        .map_err(|e| ApiError::MalformedResponse {
            operation: operation.to_string(),
            message: e.to_string(),
        })
}

/// Decodes a JSON array response, treating any other shape as malformed.
pub(crate) fn decode_array<W, T>(operation: &str, value: Value) -> Result<Listing<T>, ApiError>
where
    W: DeserializeOwned,
    T: From<W>,
{
    match value {
        Value::Array(items) => Ok(decode_listing::<W, T>(items)),
        Value::Null => Ok(Listing::empty()),
        other => Err(ApiError::MalformedResponse {
            operation: operation.to_string(),
            message: format!("expected an array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo_json() -> Value {
        json!({
            "name": "fastnet",
            "full_name": "alice/fastnet",
            "html_url": "https://github.com/alice/fastnet",
            "owner": { "login": "alice", "type": "User" },
            "stargazers_count": 1200,
            "forks_count": 40,
            "open_issues_count": 3,
            "fork": false,
            "archived": false,
            "language": "Go",
            "pushed_at": null,
            "updated_at": "2024-05-01T00:00:00Z",
            "created_at": "2020-01-01T00:00:00Z",
            "description": "Networking toolkit with tests and GitHub Actions",
            "topics": ["cli"]
        })
    }

    #[test]
    fn decodes_repo_with_fallback_timestamp_and_hints() {
        let repo: Repo = decode_one::<WireRepo, Repo>("search", repo_json()).unwrap();

        assert_eq!(repo.owner, "alice");
        assert_eq!(repo.owner_type, AccountType::Individual);
        assert_eq!(repo.stars, 1200);
        assert_eq!(
            repo.pushed_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T00:00:00+00:00".to_string())
        );
        assert!(repo.has_tests_hint);
        assert!(repo.has_ci_hint);
    }

    #[test]
    fn ci_hint_requires_whole_word() {
        let mut value = repo_json();
        value["description"] = json!("A circuit simulator");
        value["name"] = json!("circuits");
        let repo: Repo = decode_one::<WireRepo, Repo>("search", value).unwrap();

        assert!(!repo.has_ci_hint);
        assert!(!repo.has_tests_hint);
    }

    #[test]
    fn decode_listing_skips_malformed_items() {
        let listing: Listing<Repo> =
            decode_listing::<WireRepo, Repo>(vec![repo_json(), json!({ "name": 7 })]);

        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.malformed, 1);
    }

    #[test]
    fn decode_array_rejects_objects() {
        let result =
            decode_array::<WireContributor, Contributor>("contributors", json!({ "a": 1 }));
        assert!(matches!(result, Err(ApiError::MalformedResponse { .. })));
    }

    #[test]
    fn user_blank_fields_become_none() {
        let user: UserProfile = decode_one::<WireUser, UserProfile>(
            "user",
            json!({
                "login": "alice",
                "type": "User",
                "html_url": "https://github.com/alice",
                "created_at": "2015-03-01T00:00:00Z",
                "followers": 12,
                "blog": "",
                "email": null
            }),
        )
        .unwrap();

        assert_eq!(user.account_type, AccountType::Individual);
        assert_eq!(user.blog, None);
        assert_eq!(user.followers, 12);
    }
}
