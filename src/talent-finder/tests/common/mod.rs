//! In-memory GitHub fake shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use talent_finder::{
    AccountType, ApiError, Contributor, GitHubApi, Listing, RateLimitInfo, RateLimitResource,
    Repo, UserProfile,
};

/// Fixed evaluation instant.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

/// A non-fork, non-archived repo pushed ten days ago.
pub fn repo(owner: &str, name: &str, stars: u64) -> Repo {
    Repo {
        owner: owner.to_string(),
        owner_type: AccountType::Individual,
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        html_url: format!("https://github.com/{owner}/{name}"),
        stars,
        forks: stars / 10,
        open_issues: 3,
        is_fork: false,
        is_archived: false,
        language: Some("Go".to_string()),
        pushed_at: Some(days_ago(10)),
        description: Some(format!("{name} library")),
        topics: Vec::new(),
        has_tests_hint: false,
        has_ci_hint: false,
    }
}

pub fn org_repo(org: &str, name: &str, stars: u64) -> Repo {
    Repo {
        owner_type: AccountType::Organization,
        ..repo(org, name, stars)
    }
}

/// An individual account created three years ago.
pub fn user(login: &str) -> UserProfile {
    UserProfile {
        login: login.to_string(),
        account_type: AccountType::Individual,
        name: None,
        html_url: format!("https://github.com/{login}"),
        created_at: Some(days_ago(3 * 365)),
        followers: 42,
        public_repos: 8,
        email: Some(format!("{login}@example.com")),
        blog: None,
        twitter_username: None,
        company: None,
        location: None,
    }
}

pub fn contributor(login: &str, contributions: u64) -> Contributor {
    Contributor {
        login: login.to_string(),
        account_type: AccountType::Individual,
        contributions,
    }
}

#[derive(Default)]
struct Calls {
    search: usize,
    users: HashMap<String, usize>,
    repos: HashMap<String, usize>,
    contributors: HashMap<String, usize>,
}

/// Scripted [`GitHubApi`] with per-endpoint call counters.
///
/// Search pages are keyed by page number and apply to every query.
/// Unknown users resolve to `None`; unknown repo and contributor lists are
/// empty.
#[derive(Default)]
pub struct FakeApi {
    search: HashMap<u32, Result<Listing<Repo>, ApiError>>,
    users: HashMap<String, Result<Option<UserProfile>, ApiError>>,
    repos: HashMap<String, Result<Vec<Repo>, ApiError>>,
    contributors: HashMap<String, Result<Vec<Contributor>, ApiError>>,
    calls: Mutex<Calls>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_page(mut self, page: u32, repos: Vec<Repo>) -> Self {
        self.search.insert(page, Ok(Listing::new(repos)));
        self
    }

    pub fn search_listing(mut self, page: u32, listing: Listing<Repo>) -> Self {
        self.search.insert(page, Ok(listing));
        self
    }

    pub fn search_error(mut self, page: u32, error: ApiError) -> Self {
        self.search.insert(page, Err(error));
        self
    }

    pub fn user(mut self, profile: UserProfile) -> Self {
        self.users.insert(profile.login.clone(), Ok(Some(profile)));
        self
    }

    pub fn user_error(mut self, login: &str, error: ApiError) -> Self {
        self.users.insert(login.to_string(), Err(error));
        self
    }

    pub fn repos(mut self, login: &str, repos: Vec<Repo>) -> Self {
        self.repos.insert(login.to_string(), Ok(repos));
        self
    }

    pub fn repos_error(mut self, login: &str, error: ApiError) -> Self {
        self.repos.insert(login.to_string(), Err(error));
        self
    }

    pub fn contributors(mut self, full_name: &str, contributors: Vec<Contributor>) -> Self {
        self.contributors
            .insert(full_name.to_string(), Ok(contributors));
        self
    }

    pub fn contributors_error(mut self, full_name: &str, error: ApiError) -> Self {
        self.contributors.insert(full_name.to_string(), Err(error));
        self
    }

    /// An individual with a profile and an active repo list.
    pub fn candidate(self, login: &str, repos: Vec<Repo>) -> Self {
        self.user(user(login)).repos(login, repos)
    }

    pub fn search_calls(&self) -> usize {
        self.calls.lock().unwrap().search
    }

    pub fn user_calls(&self, login: &str) -> usize {
        *self.calls.lock().unwrap().users.get(login).unwrap_or(&0)
    }

    pub fn repo_calls(&self, login: &str) -> usize {
        *self.calls.lock().unwrap().repos.get(login).unwrap_or(&0)
    }

    pub fn contributor_calls(&self, full_name: &str) -> usize {
        *self
            .calls
            .lock()
            .unwrap()
            .contributors
            .get(full_name)
            .unwrap_or(&0)
    }

    pub fn total_user_calls(&self) -> usize {
        self.calls.lock().unwrap().users.values().sum()
    }
}

#[async_trait]
impl GitHubApi for FakeApi {
    async fn search_repositories(
        &self,
        _query: &str,
        page: u32,
        _per_page: u8,
    ) -> Result<Listing<Repo>, ApiError> {
        self.calls.lock().unwrap().search += 1;
        self.search
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Ok(Listing::empty()))
    }

    async fn user(&self, login: &str) -> Result<Option<UserProfile>, ApiError> {
        *self
            .calls
            .lock()
            .unwrap()
            .users
            .entry(login.to_string())
            .or_default() += 1;
        self.users.get(login).cloned().unwrap_or(Ok(None))
    }

    async fn user_repos(&self, login: &str) -> Result<Listing<Repo>, ApiError> {
        *self
            .calls
            .lock()
            .unwrap()
            .repos
            .entry(login.to_string())
            .or_default() += 1;
        self.repos
            .get(login)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(Listing::new)
    }

    async fn top_contributors(
        &self,
        full_name: &str,
        limit: u8,
    ) -> Result<Listing<Contributor>, ApiError> {
        *self
            .calls
            .lock()
            .unwrap()
            .contributors
            .entry(full_name.to_string())
            .or_default() += 1;
        self.contributors
            .get(full_name)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(|mut all| {
                all.truncate(usize::from(limit));
                Listing::new(all)
            })
    }

    async fn rate_limit(&self, _resource: RateLimitResource) -> Result<RateLimitInfo, ApiError> {
        Ok(RateLimitInfo {
            remaining: 5000,
            reset: 0,
            limit: 5000,
        })
    }
}

pub fn transient(operation: &str) -> ApiError {
    ApiError::Transient {
        operation: operation.to_string(),
        message: "502 Bad Gateway".to_string(),
    }
}

pub fn rate_limited(operation: &str) -> ApiError {
    ApiError::RateLimited {
        operation: operation.to_string(),
        reset_at: None,
    }
}
