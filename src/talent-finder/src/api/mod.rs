//! GitHub REST API access.
//!
//! [`GitHubApi`] is the seam between the discovery/ranking pipeline and the
//! remote platform. [`GitHubClient`] implements it on top of octocrab with a
//! single bounded retry; tests substitute an in-memory implementation.

mod client;
mod error;
mod models;
mod retry;
mod wire;

pub use client::GitHubClient;
pub use error::ApiError;
pub use models::{AccountType, Contributor, Listing, Repo, UserProfile};
pub use retry::{with_retry, RetryPolicy};

use crate::rate_limit::{RateLimitInfo, RateLimitResource};
use async_trait::async_trait;

/// Read-only operations the pipeline needs from the code-hosting platform.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetches one page of repository search results.
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Listing<Repo>, ApiError>;

    /// Fetches a user or organization profile; `None` if it does not exist.
    async fn user(&self, login: &str) -> Result<Option<UserProfile>, ApiError>;

    /// Fetches the repositories owned by `login`.
    async fn user_repos(&self, login: &str) -> Result<Listing<Repo>, ApiError>;

    /// Fetches up to `limit` contributors of `full_name`, most active first.
    async fn top_contributors(
        &self,
        full_name: &str,
        limit: u8,
    ) -> Result<Listing<Contributor>, ApiError>;

    /// Fetches the current rate limit status for a resource.
    async fn rate_limit(&self, resource: RateLimitResource) -> Result<RateLimitInfo, ApiError>;
}
