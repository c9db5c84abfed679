#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod api;
pub mod cache;
pub mod config;
pub mod discovery;
pub mod query;
pub mod ranking;
pub mod rate_limit;
pub mod report;
pub mod requirements;
pub mod runner;
pub mod summary;
pub mod telemetry;

pub use api::{
    AccountType, ApiError, Contributor, GitHubApi, GitHubClient, Listing, Repo, RetryPolicy,
    UserProfile,
};
pub use cache::{CacheKey, CachedApi, EndpointKind};
pub use config::{load_config, ConfigError, FinderConfig, InactivityWindow};
pub use discovery::{
    discover_owners, DiscoveryError, DiscoveryLimits, DiscoveryOutcome, DiscoveryPath,
    NotableRepo, Owner, SeedPool,
};
pub use query::{build_queries, QuerySettings};
pub use ranking::{
    rank_candidates, CandidateProfile, Contact, RankedCandidate, RankingError, RankingOutcome,
    RankingPolicy, ScoreBreakdown, ScoringWeights,
};
pub use rate_limit::{wait_if_needed, RateLimitInfo, RateLimitResource};
pub use report::{render_preview, render_report, write_report, ReportError, ReportRenderer};
pub use requirements::{extract_requirements, RequirementProfile};
pub use runner::{RunOutcome, RunOutput, Runner, RunnerConfig, RunnerError};
pub use summary::{PhaseStatus, RunSummary};
pub use telemetry::{Counter, DiscardReason, Telemetry, TelemetrySnapshot};
