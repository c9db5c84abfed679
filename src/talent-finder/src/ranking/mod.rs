//! Candidate hydration, filtering and scoring.
//!
//! Owners are processed in discovery order. Each is hydrated through the
//! shared [`CachedApi`], checked for eligibility (individual account,
//! minimum age, recent activity) and scored. Results are sorted by total
//! score with ties broken by discovery order, then truncated.

mod candidate;
mod eligibility;
mod error;
mod score;
mod weights;

pub use candidate::{CandidateProfile, Contact, RankedCandidate};
pub use eligibility::{account_age_years, is_recently_active, meets_min_age, owned_repos};
pub use error::RankingError;
pub use score::{
    activity_recency, candidate_languages, follower_score, language_overlap, repo_quality,
    score_candidate, top_repo_bonus, ScoreBreakdown, ScoreInputs,
};
pub use weights::*;

use crate::api::{AccountType, ApiError, GitHubApi};
use crate::cache::CachedApi;
use crate::discovery::{Owner, SeedPool};
use crate::requirements::RequirementProfile;
use crate::telemetry::{Counter, DiscardReason, Telemetry};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Eligibility thresholds and scoring weights.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingPolicy {
    /// Size of the final list.
    pub max_candidates: usize,
    /// Minimum account age in years.
    pub min_years: f64,
    /// Recency threshold in days, `None` to disable the filter.
    pub max_inactive_days: Option<u32>,
    /// Component weights and seed bonus.
    pub weights: ScoringWeights,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            min_years: 1.0,
            max_inactive_days: Some(365),
            weights: ScoringWeights::default(),
        }
    }
}

/// Result of a ranking phase.
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    /// Best candidates, highest score first.
    pub ranked: Vec<RankedCandidate>,

    /// Candidates that passed every filter and were scored.
    pub scored: usize,

    /// Error that ended the phase early, if any.
    pub aborted: Option<ApiError>,
}

enum Evaluation {
    Scored(Box<(CandidateProfile, ScoreBreakdown)>),
    Discarded(DiscardReason),
    Abort(ApiError),
}

/// Hydrates, filters and scores the seed pool.
///
/// # Arguments
///
/// * `api` - Memoizing client shared with discovery
/// * `pool` - Owners from discovery
/// * `profile` - Requirements, for language overlap
/// * `policy` - Thresholds and weights
/// * `telemetry` - Counters for this run
/// * `now` - Evaluation instant, fixed for the whole run
///
/// # Errors
///
/// Returns [`RankingError`] only for fatal API errors (authentication).
pub async fn rank_candidates<A: GitHubApi>(
    api: &CachedApi<A>,
    pool: &SeedPool,
    profile: &RequirementProfile,
    policy: &RankingPolicy,
    telemetry: &Telemetry,
    now: DateTime<Utc>,
) -> Result<RankingOutcome, RankingError> {
    let span = info_span!(
        "rank",
        owners = pool.len(),
        max_candidates = policy.max_candidates
    );

    async {
        info!("Starting candidate ranking");
        let ranker = Ranker {
            api,
            profile,
            policy,
            now,
        };

        let mut scored = Vec::new();
        let mut aborted = None;
        for owner in pool.iter() {
            let span = info_span!("hydrate", login = %owner.login);
            match ranker.evaluate(owner).instrument(span).await? {
                Evaluation::Scored(entry) => {
                    telemetry.inc(Counter::CandidatesScored);
                    scored.push(*entry);
                }
                Evaluation::Discarded(reason) => {
                    telemetry.inc(Counter::filtered(reason));
                    debug!(login = %owner.login, reason = reason.as_str(), "Discarded owner");
                }
                Evaluation::Abort(e) => {
                    error!(error = %e, scored = scored.len(), "Ranking aborted");
                    aborted = Some(e);
                    break;
                }
            }
        }

        let scored_count = scored.len();
        let ranked = select_top(scored, policy.max_candidates);
        info!(scored = scored_count, ranked = ranked.len(), "Ranking complete");
        Ok(RankingOutcome {
            ranked,
            scored: scored_count,
            aborted,
        })
    }
    .instrument(span)
    .await
}

/// Sorts by total descending, earliest discovery first on ties, and keeps
/// the best `limit`.
#[must_use]
pub fn select_top(
    mut scored: Vec<(CandidateProfile, ScoreBreakdown)>,
    limit: usize,
) -> Vec<RankedCandidate> {
    scored.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .total
            .total_cmp(&a_score.total)
            .then(a.discovery_order.cmp(&b.discovery_order))
    });
    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (candidate, score))| RankedCandidate {
            rank: i + 1,
            candidate,
            score,
        })
        .collect()
}

struct Ranker<'a, A> {
    api: &'a CachedApi<A>,
    profile: &'a RequirementProfile,
    policy: &'a RankingPolicy,
    now: DateTime<Utc>,
}

impl<A: GitHubApi> Ranker<'_, A> {
    async fn evaluate(&self, owner: &Owner) -> Result<Evaluation, RankingError> {
        let user = match self.api.user(&owner.login).await {
            Ok(Some(user)) => user,
            Ok(None) => return Ok(Evaluation::Discarded(DiscardReason::NotFound)),
            Err(e) => return failed(owner, e),
        };

        if user.account_type != AccountType::Individual {
            return Ok(Evaluation::Discarded(DiscardReason::NotIndividual));
        }
        if !meets_min_age(user.created_at, self.policy.min_years, self.now) {
            return Ok(Evaluation::Discarded(DiscardReason::AccountAge));
        }

        let repos = match self.api.user_repos(&owner.login).await {
            Ok(repos) => owned_repos(&owner.login, repos),
            Err(e) => return failed(owner, e),
        };

        if let Some(days) = self.policy.max_inactive_days {
            if !is_recently_active(&repos, days, self.now) {
                return Ok(Evaluation::Discarded(DiscardReason::Inactive));
            }
        }

        let mut top = repos;
        top.truncate(TOP_REPO_LIMIT);
        let languages = candidate_languages(&top);
        let score = score_candidate(
            ScoreInputs {
                repos: &top,
                languages: &languages,
                required_languages: self.profile.languages(),
                followers: user.followers,
                seed_stars: owner.notable_repo.stars,
            },
            &self.policy.weights,
            self.now,
        );
        let age = account_age_years(user.created_at, self.now).unwrap_or_default();

        debug!(total = score.total, "Scored candidate");
        let candidate = CandidateProfile::new(owner, &user, age, top, languages);
        Ok(Evaluation::Scored(Box::new((candidate, score))))
    }
}

/// Sorts a failed hydration into fatal, phase-ending or skippable.
fn failed(owner: &Owner, e: ApiError) -> Result<Evaluation, RankingError> {
    if e.is_fatal() {
        return Err(RankingError::Api(e));
    }
    if e.aborts_phase() {
        return Ok(Evaluation::Abort(e));
    }
    warn!(login = %owner.login, error = %e, "Skipping owner after failed fetch");
    Ok(Evaluation::Discarded(DiscardReason::FetchFailed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{DiscoveryPath, NotableRepo};

    fn entry(login: &str, order: usize, total: f64) -> (CandidateProfile, ScoreBreakdown) {
        let candidate = CandidateProfile {
            login: login.to_string(),
            name: None,
            html_url: format!("https://github.com/{login}"),
            account_age_years: 3.0,
            followers: 0,
            public_repos: 0,
            contact: Contact::default(),
            repos: Vec::new(),
            languages: Vec::new(),
            notable_repo: NotableRepo {
                full_name: format!("{login}/repo"),
                html_url: format!("https://github.com/{login}/repo"),
                stars: 10,
            },
            discovered_via: DiscoveryPath::OwnedRepo,
            discovery_order: order,
            total_stars: 10,
        };
        let score = ScoreBreakdown {
            language_overlap: 0.0,
            repo_quality: 0.0,
            activity_recency: 0.0,
            followers: 0.0,
            top_repo: 0.0,
            seed_bonus: 0.0,
            total,
        };
        (candidate, score)
    }

    #[test]
    fn select_top_sorts_and_breaks_ties_by_discovery_order() {
        let ranked = select_top(
            vec![
                entry("late", 3, 0.5),
                entry("best", 2, 0.9),
                entry("early", 1, 0.5),
                entry("worst", 0, 0.1),
            ],
            3,
        );

        let logins: Vec<_> = ranked.iter().map(|r| r.candidate.login.as_str()).collect();
        assert_eq!(logins, vec!["best", "early", "late"]);
        assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn select_top_handles_fewer_than_limit() {
        let ranked = select_top(vec![entry("only", 0, 0.3)], 10);
        assert_eq!(ranked.len(), 1);
        assert!(select_top(Vec::new(), 10).is_empty());
    }
}
