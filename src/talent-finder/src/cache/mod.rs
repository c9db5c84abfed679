//! Per-run memoization of user, repo-list and contributor fetches.
//!
//! [`CachedApi`] wraps a [`GitHubApi`] and is shared by discovery and
//! ranking, so any login is fetched at most once per run. Failed fetches
//! are memoized as well and replayed on later lookups.

mod key;

pub use key::{CacheKey, EndpointKind};

use crate::api::{ApiError, Contributor, GitHubApi, Listing, Repo, UserProfile};
use crate::rate_limit::{RateLimitInfo, RateLimitResource};
use crate::telemetry::{Counter, Telemetry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone)]
enum CachedResponse {
    User(Result<Option<UserProfile>, ApiError>),
    Repos(Result<Vec<Repo>, ApiError>),
    Contributors(Result<Vec<Contributor>, ApiError>),
}

/// Memoizing, telemetry-recording wrapper around a [`GitHubApi`].
pub struct CachedApi<A> {
    inner: A,
    telemetry: Arc<Telemetry>,
    entries: Mutex<HashMap<CacheKey, CachedResponse>>,
}

impl<A: GitHubApi> CachedApi<A> {
    /// Wraps `inner`, recording fetches and hits into `telemetry`.
    pub fn new(inner: A, telemetry: Arc<Telemetry>) -> Self {
        Self {
            inner,
            telemetry,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped client.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Number of memoized responses.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Fetches a search page. Search results are never memoized.
    ///
    /// The whole listing is returned so callers can tell a short page from
    /// a full page with malformed records; those are counted here.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`].
    pub async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Listing<Repo>, ApiError> {
        self.telemetry.inc(Counter::SearchFetches);
        let result = self.inner.search_repositories(query, page, per_page).await;
        if let Ok(listing) = &result {
            self.note_malformed(listing.malformed);
        }
        self.note_failure(&result);
        result
    }

    /// Fetches a profile, memoized by login.
    ///
    /// # Errors
    ///
    /// Returns the (possibly memoized) [`ApiError`] of the first fetch.
    pub async fn user(&self, login: &str) -> Result<Option<UserProfile>, ApiError> {
        let key = CacheKey::new(EndpointKind::User, login);
        if let Some(CachedResponse::User(result)) = self.lookup(&key) {
            self.telemetry.inc(Counter::UserCacheHits);
            return result;
        }

        self.telemetry.inc(Counter::UserFetches);
        let result = self.inner.user(login).await;
        self.note_failure(&result);
        self.store(key, CachedResponse::User(result.clone()));
        result
    }

    /// Fetches the repos owned by `login`, memoized by login.
    ///
    /// # Errors
    ///
    /// Returns the (possibly memoized) [`ApiError`] of the first fetch.
    pub async fn user_repos(&self, login: &str) -> Result<Vec<Repo>, ApiError> {
        let key = CacheKey::new(EndpointKind::Repos, login);
        if let Some(CachedResponse::Repos(result)) = self.lookup(&key) {
            self.telemetry.inc(Counter::RepoCacheHits);
            return result;
        }

        self.telemetry.inc(Counter::RepoFetches);
        let result = self
            .inner
            .user_repos(login)
            .await
            .map(|listing| self.accept(listing));
        self.note_failure(&result);
        self.store(key, CachedResponse::Repos(result.clone()));
        result
    }

    /// Fetches the top contributors of a repo, memoized by full name.
    ///
    /// # Errors
    ///
    /// Returns the (possibly memoized) [`ApiError`] of the first fetch.
    pub async fn top_contributors(
        &self,
        full_name: &str,
        limit: u8,
    ) -> Result<Vec<Contributor>, ApiError> {
        let key = CacheKey::new(EndpointKind::Contributors, full_name);
        if let Some(CachedResponse::Contributors(result)) = self.lookup(&key) {
            self.telemetry.inc(Counter::ContribCacheHits);
            return result;
        }

        self.telemetry.inc(Counter::ContribFetches);
        let result = self
            .inner
            .top_contributors(full_name, limit)
            .await
            .map(|listing| self.accept(listing));
        self.note_failure(&result);
        self.store(key, CachedResponse::Contributors(result.clone()));
        result
    }

    /// Passes a rate limit query through to the wrapped client.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`].
    pub async fn rate_limit(&self, resource: RateLimitResource) -> Result<RateLimitInfo, ApiError> {
        self.inner.rate_limit(resource).await
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CachedResponse>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, key: &CacheKey) -> Option<CachedResponse> {
        let hit = self.entries().get(key).cloned();
        if hit.is_some() {
            debug!(key = %key, "Cache hit");
        }
        hit
    }

    fn store(&self, key: CacheKey, response: CachedResponse) {
        self.entries().insert(key, response);
    }

    fn accept<T>(&self, listing: Listing<T>) -> Vec<T> {
        self.note_malformed(listing.malformed);
        listing.items
    }

    fn note_malformed(&self, malformed: usize) {
        if malformed > 0 {
            self.telemetry.add(Counter::MalformedRecords, malformed as u64);
        }
    }

    fn note_failure<T>(&self, result: &Result<T, ApiError>) {
        if let Err(e) = result {
            self.telemetry.inc(Counter::FetchFailures);
            if matches!(e, ApiError::MalformedResponse { .. }) {
                self.telemetry.inc(Counter::MalformedRecords);
            }
        }
    }
}
