//! Owner discovery through repository search.
//!
//! Discovery pages through search results for each query and turns repo
//! owners into a bounded [`SeedPool`]. Individually owned repos add their
//! owner directly; organization repos are expanded into their top
//! individual contributors. Once the pool is full no further repo, page or
//! query is examined.

mod error;
mod owner;
mod seed_pool;

pub use error::DiscoveryError;
pub use owner::{repo_star_weight, DiscoveryPath, NotableRepo, Owner};
pub use seed_pool::{Admission, SeedPool};

use crate::api::{AccountType, ApiError, GitHubApi, Repo};
use crate::cache::CachedApi;
use crate::telemetry::{Counter, Telemetry};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Budgets bounding the API cost of discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryLimits {
    /// Maximum owners in the seed pool.
    pub seed_pool: usize,
    /// Search pages fetched per query.
    pub pages_per_query: u32,
    /// Results per search page.
    pub per_page: u8,
    /// Contributors fetched per organization repo.
    pub contributors_per_repo: u8,
    /// Maximum owners added through organization contributors.
    pub contributor_cap: usize,
}

impl Default for DiscoveryLimits {
    fn default() -> Self {
        Self {
            seed_pool: 120,
            pages_per_query: 3,
            per_page: 50,
            contributors_per_repo: 3,
            contributor_cap: 120,
        }
    }
}

/// Result of a discovery phase.
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// Owners found, in discovery order.
    pub pool: SeedPool,

    /// Error that ended the phase early, if any. The pool holds everything
    /// accumulated before it.
    pub aborted: Option<ApiError>,
}

/// Whether discovery should keep going after handling a unit of work.
enum Flow {
    Continue,
    Abort(ApiError),
}

/// Runs discovery for `queries` in order.
///
/// # Arguments
///
/// * `api` - Memoizing client shared with ranking
/// * `queries` - Search queries, issued in order
/// * `limits` - Pool, page and contributor budgets
/// * `telemetry` - Counters for this run
///
/// # Errors
///
/// Returns [`DiscoveryError`] only for fatal API errors (authentication).
/// Rate limit exhaustion ends the phase with the partial pool.
pub async fn discover_owners<A: GitHubApi>(
    api: &CachedApi<A>,
    queries: &[String],
    limits: &DiscoveryLimits,
    telemetry: &Telemetry,
) -> Result<DiscoveryOutcome, DiscoveryError> {
    let span = info_span!(
        "discover",
        queries = queries.len(),
        seed_pool = limits.seed_pool
    );

    async {
        info!("Starting owner discovery");
        let mut discovery = Discovery {
            api,
            limits,
            telemetry,
            pool: SeedPool::new(limits.seed_pool),
            contributor_owners: 0,
        };

        let aborted = match discovery.run(queries).await? {
            Flow::Continue => None,
            Flow::Abort(e) => {
                error!(error = %e, owners = discovery.pool.len(), "Discovery aborted");
                Some(e)
            }
        };

        info!(
            owners = discovery.pool.len(),
            contributor_owners = discovery.contributor_owners,
            "Discovery complete"
        );
        Ok(DiscoveryOutcome {
            pool: discovery.pool,
            aborted,
        })
    }
    .instrument(span)
    .await
}

struct Discovery<'a, A> {
    api: &'a CachedApi<A>,
    limits: &'a DiscoveryLimits,
    telemetry: &'a Telemetry,
    pool: SeedPool,
    contributor_owners: usize,
}

impl<A: GitHubApi> Discovery<'_, A> {
    async fn run(&mut self, queries: &[String]) -> Result<Flow, DiscoveryError> {
        for query in queries {
            if self.pool.is_full() {
                break;
            }
            self.telemetry.inc(Counter::QueriesIssued);
            debug!(query = %query, "Executing repository search");

            for page in 1..=self.limits.pages_per_query {
                if self.pool.is_full() {
                    return Ok(Flow::Continue);
                }

                let listing = match self
                    .api
                    .search_repositories(query, page, self.limits.per_page)
                    .await
                {
                    Ok(listing) => listing,
                    Err(e) => match triage(e)? {
                        Some(abort) => return Ok(abort),
                        None => {
                            warn!(query = %query, page, "Skipping search page");
                            continue;
                        }
                    },
                };

                // Malformed records still occupy a slot on the page.
                let exhausted = listing.received() < usize::from(self.limits.per_page);
                for repo in &listing.items {
                    if self.pool.is_full() {
                        return Ok(Flow::Continue);
                    }
                    if let Flow::Abort(e) = self.examine(repo).await? {
                        return Ok(Flow::Abort(e));
                    }
                }

                if exhausted {
                    debug!(query = %query, page, "Search results exhausted");
                    break;
                }
            }
        }
        Ok(Flow::Continue)
    }

    async fn examine(&mut self, repo: &Repo) -> Result<Flow, DiscoveryError> {
        self.telemetry.inc(Counter::ReposExamined);
        if !repo.is_eligible() {
            self.telemetry.inc(Counter::ReposSkippedForkOrArchived);
            return Ok(Flow::Continue);
        }

        match repo.owner_type {
            AccountType::Individual => {
                self.telemetry.inc(Counter::UserOwnedRepos);
                self.pool.record(&repo.owner, repo, DiscoveryPath::OwnedRepo);
                Ok(Flow::Continue)
            }
            AccountType::Organization => {
                self.telemetry.inc(Counter::OrgReposExamined);
                self.expand_organization_repo(repo).await
            }
            AccountType::Other => {
                debug!(repo = %repo.full_name, "Skipping repo with unsupported owner type");
                Ok(Flow::Continue)
            }
        }
    }

    async fn expand_organization_repo(&mut self, repo: &Repo) -> Result<Flow, DiscoveryError> {
        if self.contributor_owners >= self.limits.contributor_cap {
            debug!(repo = %repo.full_name, "Contributor cap reached, skipping org repo");
            return Ok(Flow::Continue);
        }

        let contributors = match self
            .api
            .top_contributors(&repo.full_name, self.limits.contributors_per_repo)
            .await
        {
            Ok(contributors) => contributors,
            Err(e) => {
                return Ok(match triage(e)? {
                    Some(abort) => abort,
                    None => {
                        warn!(repo = %repo.full_name, "Skipping org repo contributors");
                        Flow::Continue
                    }
                });
            }
        };

        for contributor in contributors
            .iter()
            .filter(|c| c.account_type == AccountType::Individual)
        {
            let admission = if self.contributor_owners < self.limits.contributor_cap {
                self.pool
                    .record(&contributor.login, repo, DiscoveryPath::OrgContributor)
            } else {
                self.pool.record_existing(&contributor.login, repo)
            };

            if admission == Admission::New {
                self.contributor_owners += 1;
                self.telemetry.inc(Counter::OrgContribCandidates);
                debug!(login = %contributor.login, repo = %repo.full_name, "Added org contributor");
            }
        }
        Ok(Flow::Continue)
    }
}

/// Sorts a failed fetch into fatal, phase-ending or skippable.
fn triage(e: ApiError) -> Result<Option<Flow>, DiscoveryError> {
    if e.is_fatal() {
        return Err(DiscoveryError::Api(e));
    }
    if e.aborts_phase() {
        return Ok(Some(Flow::Abort(e)));
    }
    warn!(error = %e, "Fetch failed");
    Ok(None)
}
