//! Octocrab-backed [`GitHubApi`] implementation.

use super::error::ApiError;
use super::models::{Contributor, Listing, Repo, UserProfile};
use super::retry::{with_retry, RetryPolicy};
use super::wire::{
    decode_array, decode_listing, decode_one, WireContributor, WireRepo, WireSearchPage, WireUser,
};
use super::GitHubApi;
use crate::rate_limit::{fetch_rate_limit, RateLimitInfo, RateLimitResource};
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Repos requested per user repo-list call.
const USER_REPOS_PER_PAGE: u8 = 100;

/// Connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-response read timeout.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated GitHub REST client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    retry: RetryPolicy,
}

impl GitHubClient {
    /// Builds a client authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] if the token is empty, or
    /// [`ApiError::Unexpected`] if the client cannot be constructed.
    pub fn new(token: &str, base_url: Option<&Url>) -> Result<Self, ApiError> {
        if token.trim().is_empty() {
            return Err(ApiError::Authentication {
                message: "no GitHub token supplied (set GITHUB_TOKEN)".to_string(),
            });
        }

        // Retries are owned by `RetryPolicy`; octocrab's own layer is disabled.
        let mut builder = Octocrab::builder()
            .personal_token(token.trim().to_string())
            .add_retry_config(RetryConfig::None)
            .set_connect_timeout(Some(CONNECT_TIMEOUT))
            .set_read_timeout(Some(READ_TIMEOUT));
        if let Some(url) = base_url {
            builder = builder
                .base_uri(url.as_str())
                .map_err(|e| classify("client setup", &e))?;
        }
        let octocrab = builder.build().map_err(|e| classify("client setup", &e))?;

        Ok(Self {
            octocrab,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Issues a GET with retry, returning `None` for 404 responses.
    async fn get_json(
        &self,
        operation: &str,
        resource: RateLimitResource,
        route: &str,
        params: &[(&str, String)],
    ) -> Result<Option<Value>, ApiError> {
        let this = self;
        with_retry(&self.retry, operation, move || async move {
            debug!(route, "GET");
            match this.octocrab.get::<Value, _, _>(route, Some(params)).await {
                Ok(value) => Ok(Some(value)),
                Err(e) if status_of(&e) == Some(404) => Ok(None),
                Err(e) => Err(this.annotate(classify(operation, &e), resource).await),
            }
        })
        .await
    }

    /// Fills in the reset time of a rate-limit error.
    async fn annotate(&self, error: ApiError, resource: RateLimitResource) -> ApiError {
        match error {
            ApiError::RateLimited {
                operation,
                reset_at: None,
            } => {
                let reset_at = fetch_rate_limit(&self.octocrab, resource)
                    .await
                    .ok()
                    .map(|info| info.reset);
                ApiError::RateLimited {
                    operation,
                    reset_at,
                }
            }
            other => other,
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    #[instrument(skip(self), level = "debug")]
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Listing<Repo>, ApiError> {
        let params = [
            ("q", query.to_string()),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        let Some(value) = self
            .get_json(
                "search repositories",
                RateLimitResource::Search,
                "/search/repositories",
                &params,
            )
            .await?
        else {
            return Ok(Listing::empty());
        };

        let page: WireSearchPage =
            serde_json::from_value(value).map_err(|e| ApiError::MalformedResponse {
                operation: "search repositories".to_string(),
                message: e.to_string(),
            })?;
        Ok(decode_listing::<WireRepo, Repo>(page.items))
    }

    #[instrument(skip(self), level = "debug")]
    async fn user(&self, login: &str) -> Result<Option<UserProfile>, ApiError> {
        let route = format!("/users/{login}");
        self.get_json("user", RateLimitResource::Core, &route, &[])
            .await?
            .map(|value| decode_one::<WireUser, UserProfile>("user", value))
            .transpose()
    }

    #[instrument(skip(self), level = "debug")]
    async fn user_repos(&self, login: &str) -> Result<Listing<Repo>, ApiError> {
        let route = format!("/users/{login}/repos");
        let params = [
            ("per_page", USER_REPOS_PER_PAGE.to_string()),
            ("type", "owner".to_string()),
            ("sort", "updated".to_string()),
        ];
        match self
            .get_json("user repos", RateLimitResource::Core, &route, &params)
            .await?
        {
            Some(value) => decode_array::<WireRepo, Repo>("user repos", value),
            None => Ok(Listing::empty()),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn top_contributors(
        &self,
        full_name: &str,
        limit: u8,
    ) -> Result<Listing<Contributor>, ApiError> {
        let route = format!("/repos/{full_name}/contributors");
        let params = [
            ("per_page", limit.to_string()),
            ("anon", "false".to_string()),
        ];
        let mut listing = match self
            .get_json("contributors", RateLimitResource::Core, &route, &params)
            .await?
        {
            Some(value) => decode_array::<WireContributor, Contributor>("contributors", value)?,
            None => Listing::empty(),
        };
        listing.items.truncate(usize::from(limit));
        Ok(listing)
    }

    async fn rate_limit(&self, resource: RateLimitResource) -> Result<RateLimitInfo, ApiError> {
        fetch_rate_limit(&self.octocrab, resource)
            .await
            .map_err(|e| classify("rate limit", &e))
    }
}

/// Extracts the HTTP status of a GitHub error response.
fn status_of(error: &octocrab::Error) -> Option<u16> {
    match error {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// Maps an octocrab error onto the [`ApiError`] taxonomy.
fn classify(operation: &str, error: &octocrab::Error) -> ApiError {
    let operation = operation.to_string();
    match error {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            classify_status(operation, status, &source.message)
        }
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
            ApiError::MalformedResponse {
                operation,
                message: error.to_string(),
            }
        }
        _ => ApiError::Transient {
            operation,
            message: error.to_string(),
        },
    }
}

/// Maps a non-success status and message onto the [`ApiError`] taxonomy.
fn classify_status(operation: String, status: u16, message: &str) -> ApiError {
    let rate_limited = message.to_lowercase().contains("rate limit");
    match status {
        401 => ApiError::Authentication {
            message: message.to_string(),
        },
        429 => ApiError::RateLimited {
            operation,
            reset_at: None,
        },
        403 if rate_limited => ApiError::RateLimited {
            operation,
            reset_at: None,
        },
        500..=599 => ApiError::Transient {
            operation,
            message: format!("{status}: {message}"),
        },
        _ => ApiError::Unexpected {
            operation,
            status: Some(status),
            message: message.to_string(),
        },
    }
}
