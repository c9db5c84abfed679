//! Orchestrates a discovery-and-ranking run.

mod config;
mod error;

pub use config::{RunnerConfig, DEFAULT_REPORT_PATH};
pub use error::RunnerError;

use crate::api::{GitHubApi, GitHubClient};
use crate::cache::CachedApi;
use crate::discovery::discover_owners;
use crate::query::build_queries;
use crate::ranking::{rank_candidates, RankedCandidate};
use crate::rate_limit::{wait_if_needed, RateLimitResource};
use crate::report::{render_preview, write_report, ReportRenderer};
use crate::requirements::RequirementProfile;
use crate::summary::RunSummary;
use crate::telemetry::Telemetry;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the run's output went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    /// The report was written to this path.
    Written(PathBuf),
    /// Dry run: the rendered preview, nothing was written.
    Preview(String),
    /// Discovery found nobody, so no report was produced.
    Skipped,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Final ranked candidates, best first.
    pub ranked: Vec<RankedCandidate>,

    /// Counts, phase statuses and telemetry snapshots.
    pub summary: RunSummary,

    /// Report or preview.
    pub output: RunOutput,
}

/// Orchestrates query building, discovery, ranking and reporting.
pub struct Runner<A = GitHubClient> {
    config: RunnerConfig,
    api: CachedApi<A>,
    telemetry: Arc<Telemetry>,
    renderer: ReportRenderer,
}

impl Runner<GitHubClient> {
    /// Builds a runner backed by the GitHub REST API.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the token is missing.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        config.finder().validate("<settings>")?;
        let client = GitHubClient::new(config.token(), config.finder().api_base_url().as_ref())?;
        Ok(Self::with_api(config, client))
    }
}

impl<A: GitHubApi> Runner<A> {
    /// Builds a runner over any [`GitHubApi`] implementation.
    pub fn with_api(config: RunnerConfig, api: A) -> Self {
        let telemetry = Arc::new(Telemetry::new());
        Self {
            config,
            api: CachedApi::new(api, Arc::clone(&telemetry)),
            telemetry,
            renderer: ReportRenderer::new(),
        }
    }

    /// Counters for this runner's run.
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// The memoizing client shared by both phases.
    pub fn api(&self) -> &CachedApi<A> {
        &self.api
    }

    /// Executes a run evaluated at the current time.
    ///
    /// # Errors
    ///
    /// Returns an error on fatal API failures or if the report cannot be
    /// written.
    pub async fn run(&self, profile: &RequirementProfile) -> Result<RunOutcome, RunnerError> {
        self.run_at(profile, Utc::now()).await
    }

    /// Executes a run evaluated at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error on fatal API failures or if the report cannot be
    /// written.
    pub async fn run_at(
        &self,
        profile: &RequirementProfile,
        now: DateTime<Utc>,
    ) -> Result<RunOutcome, RunnerError> {
        let finder = self.config.finder();
        let mut summary = RunSummary::new(self.config.dry_run());

        let queries = build_queries(profile, &finder.query_settings(), now);
        summary.queries_built = queries.len();
        info!(count = queries.len(), "Built search queries");
        for query in &queries {
            debug!(query = %query, "Search query");
        }

        self.check_rate_limit(RateLimitResource::Search).await;
        let discovery = discover_owners(
            &self.api,
            &queries,
            &finder.discovery_limits(),
            &self.telemetry,
        )
        .await?;
        summary.record_discovery(&discovery, self.telemetry.discovery_summary());

        if discovery.pool.is_empty() {
            warn!("No candidates discovered");
            summary.record_failures(&self.telemetry.full_snapshot());
            return Ok(RunOutcome {
                ranked: Vec::new(),
                summary,
                output: RunOutput::Skipped,
            });
        }

        self.check_rate_limit(RateLimitResource::Core).await;
        let ranking = rank_candidates(
            &self.api,
            &discovery.pool,
            profile,
            &finder.ranking_policy(),
            &self.telemetry,
            now,
        )
        .await?;
        summary.record_ranking(&ranking, self.telemetry.ranking_summary());

        let full = self.telemetry.full_snapshot();
        summary.record_failures(&full);

        let output = if self.config.dry_run() {
            RunOutput::Preview(render_preview(&self.renderer, profile, &ranking.ranked)?)
        } else {
            let path = self.config.report_path();
            write_report(&self.renderer, path, profile, &ranking.ranked, &full)?;
            RunOutput::Written(path.to_path_buf())
        };

        Ok(RunOutcome {
            ranked: ranking.ranked,
            summary,
            output,
        })
    }

    /// Logs the rate limit for `resource` and waits if it is nearly spent.
    async fn check_rate_limit(&self, resource: RateLimitResource) {
        match self.api.rate_limit(resource).await {
            Ok(info) => {
                info!(
                    ?resource,
                    remaining = info.remaining,
                    limit = info.limit,
                    reset = info.reset,
                    "Rate limit status"
                );
                wait_if_needed(&info).await;
            }
            Err(e) => warn!(?resource, error = %e, "Failed to check rate limit"),
        }
    }
}
