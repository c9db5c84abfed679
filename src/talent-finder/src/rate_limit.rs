//! Rate limiting utilities for GitHub API.
//!
//! This module turns GitHub rate limit metadata into wait durations and
//! provides the proactive wait used between phases.

use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset.
pub const MAX_WAIT_SECS: u64 = 60;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// GitHub rate limit bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResource {
    /// REST endpoints (users, repos, contributors).
    Core,
    /// Search endpoints.
    Search,
}

/// Rate limit information for a specific resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns true if the remaining budget is below the proactive threshold.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < MIN_REMAINING_THRESHOLD
    }
}

/// Fetches the current rate limit status for a resource.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn fetch_rate_limit(
    octocrab: &Octocrab,
    resource: RateLimitResource,
) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let bucket = match resource {
        RateLimitResource::Core => &rate_limit.resources.core,
        RateLimitResource::Search => &rate_limit.resources.search,
    };

    Ok(RateLimitInfo {
        remaining: bucket.remaining as u32,
        reset: bucket.reset,
        limit: bucket.limit as u32,
    })
}

/// Computes how long to wait for a reset at `reset` (unix seconds).
///
/// Waits one second past the reset, at least one second and at most `cap`.
#[must_use]
pub fn reset_wait(reset: u64, now: DateTime<Utc>, cap: Duration) -> Duration {
    let now_secs = u64::try_from(now.timestamp()).unwrap_or_default();
    let wait = reset.saturating_sub(now_secs).saturating_add(1).max(1);
    Duration::from_secs(wait).min(cap)
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// This function proactively waits when remaining requests fall below
/// `MIN_REMAINING_THRESHOLD` to avoid hitting hard limits.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    if !info.is_low() {
        return false;
    }

    let now = Utc::now();
    let now_secs = u64::try_from(now.timestamp()).unwrap_or_default();
    if info.reset <= now_secs {
        return false;
    }

    let cap = Duration::from_secs(MAX_WAIT_SECS);
    if info.reset - now_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs = info.reset - now_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    let actual_wait = reset_wait(info.reset, now, cap);
    info!(
        remaining = info.remaining,
        wait_secs = actual_wait.as_secs(),
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(actual_wait).await;
    true
}
