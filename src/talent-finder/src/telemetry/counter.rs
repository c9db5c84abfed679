//! Telemetry counter names.

/// Why an owner was dropped before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscardReason {
    /// The login no longer resolves to a profile.
    NotFound,
    /// The hydrated account is not an individual.
    NotIndividual,
    /// The account is younger than `min-years`.
    AccountAge,
    /// No owned repo was pushed within `max-inactive-days`.
    Inactive,
    /// Hydration failed after retries.
    FetchFailed,
}

impl DiscardReason {
    /// Human-readable reason used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "profile not found",
            Self::NotIndividual => "not an individual account",
            Self::AccountAge => "account too young",
            Self::Inactive => "no recent activity",
            Self::FetchFailed => "hydration failed",
        }
    }
}

/// A named, monotonically increasing counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    QueriesIssued,
    SearchFetches,
    ReposExamined,
    ReposSkippedForkOrArchived,
    UserOwnedRepos,
    OrgReposExamined,
    OrgContribCandidates,
    ContribFetches,
    ContribCacheHits,
    UserFetches,
    UserCacheHits,
    RepoFetches,
    RepoCacheHits,
    FetchFailures,
    MalformedRecords,
    FilteredNotFound,
    FilteredNotIndividual,
    FilteredAccountAge,
    FilteredInactive,
    FilteredFetchFailed,
    CandidatesScored,
}

impl Counter {
    /// Every counter, in snapshot order.
    pub const ALL: [Counter; 21] = [
        Counter::QueriesIssued,
        Counter::SearchFetches,
        Counter::ReposExamined,
        Counter::ReposSkippedForkOrArchived,
        Counter::UserOwnedRepos,
        Counter::OrgReposExamined,
        Counter::OrgContribCandidates,
        Counter::ContribFetches,
        Counter::ContribCacheHits,
        Counter::UserFetches,
        Counter::UserCacheHits,
        Counter::RepoFetches,
        Counter::RepoCacheHits,
        Counter::FetchFailures,
        Counter::MalformedRecords,
        Counter::FilteredNotFound,
        Counter::FilteredNotIndividual,
        Counter::FilteredAccountAge,
        Counter::FilteredInactive,
        Counter::FilteredFetchFailed,
        Counter::CandidatesScored,
    ];

    /// Number of counters.
    pub const COUNT: usize = Self::ALL.len();

    /// Counters reported after discovery.
    pub const DISCOVERY: [Counter; 9] = [
        Counter::QueriesIssued,
        Counter::SearchFetches,
        Counter::ReposExamined,
        Counter::ReposSkippedForkOrArchived,
        Counter::UserOwnedRepos,
        Counter::OrgReposExamined,
        Counter::OrgContribCandidates,
        Counter::ContribFetches,
        Counter::ContribCacheHits,
    ];

    /// Counters reported after ranking.
    pub const RANKING: [Counter; 12] = [
        Counter::UserFetches,
        Counter::UserCacheHits,
        Counter::RepoFetches,
        Counter::RepoCacheHits,
        Counter::FetchFailures,
        Counter::MalformedRecords,
        Counter::FilteredNotFound,
        Counter::FilteredNotIndividual,
        Counter::FilteredAccountAge,
        Counter::FilteredInactive,
        Counter::FilteredFetchFailed,
        Counter::CandidatesScored,
    ];

    /// Snapshot key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::QueriesIssued => "queries_issued",
            Self::SearchFetches => "search_fetches",
            Self::ReposExamined => "repos_examined",
            Self::ReposSkippedForkOrArchived => "repos_skipped_fork_or_archived",
            Self::UserOwnedRepos => "user_owned_repos",
            Self::OrgReposExamined => "org_repos_examined",
            Self::OrgContribCandidates => "org_contrib_candidates",
            Self::ContribFetches => "contrib_fetches",
            Self::ContribCacheHits => "contrib_cache_hits",
            Self::UserFetches => "user_fetches",
            Self::UserCacheHits => "user_cache_hits",
            Self::RepoFetches => "repo_fetches",
            Self::RepoCacheHits => "repo_cache_hits",
            Self::FetchFailures => "fetch_failures",
            Self::MalformedRecords => "malformed_records",
            Self::FilteredNotFound => "filtered_not_found",
            Self::FilteredNotIndividual => "filtered_not_individual",
            Self::FilteredAccountAge => "filtered_account_age",
            Self::FilteredInactive => "filtered_inactive",
            Self::FilteredFetchFailed => "filtered_fetch_failed",
            Self::CandidatesScored => "candidates_scored",
        }
    }

    /// The filtered-out counter for a discard reason.
    #[must_use]
    pub fn filtered(reason: DiscardReason) -> Self {
        match reason {
            DiscardReason::NotFound => Self::FilteredNotFound,
            DiscardReason::NotIndividual => Self::FilteredNotIndividual,
            DiscardReason::AccountAge => Self::FilteredAccountAge,
            DiscardReason::Inactive => Self::FilteredInactive,
            DiscardReason::FetchFailed => Self::FilteredFetchFailed,
        }
    }

    pub(super) fn index(self) -> usize {
        self as usize
    }
}
