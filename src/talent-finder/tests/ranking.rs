mod common;

use common::{days_ago, now, org_repo, contributor, rate_limited, repo, transient, user, FakeApi};
use std::sync::Arc;
use talent_finder::{
    discover_owners, rank_candidates, AccountType, ApiError, CachedApi, Counter, DiscoveryLimits,
    RankingError, RankingOutcome, RankingPolicy, RequirementProfile, SeedPool, Telemetry,
};

fn cached(api: FakeApi) -> (CachedApi<FakeApi>, Arc<Telemetry>) {
    let telemetry = Arc::new(Telemetry::new());
    (CachedApi::new(api, Arc::clone(&telemetry)), telemetry)
}

fn go_profile() -> RequirementProfile {
    RequirementProfile::new(["Go"], Vec::<String>::new(), ["cli"])
}

async fn discover(api: &CachedApi<FakeApi>, telemetry: &Telemetry, seed_pool: usize) -> SeedPool {
    let limits = DiscoveryLimits {
        seed_pool,
        pages_per_query: 1,
        per_page: 50,
        contributors_per_repo: 3,
        contributor_cap: seed_pool,
    };
    discover_owners(api, &["q".to_string()], &limits, telemetry)
        .await
        .unwrap()
        .pool
}

async fn rank(
    api: &CachedApi<FakeApi>,
    pool: &SeedPool,
    policy: &RankingPolicy,
    telemetry: &Telemetry,
) -> RankingOutcome {
    rank_candidates(api, pool, &go_profile(), policy, telemetry, now())
        .await
        .unwrap()
}

#[tokio::test]
async fn inactive_candidate_is_discarded_before_scoring() {
    let mut stale = repo("stale", "old-tool", 80);
    stale.pushed_at = Some(days_ago(200));
    let api = FakeApi::new()
        .search_page(1, vec![stale.clone()])
        .candidate("stale", vec![stale]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let policy = RankingPolicy {
        max_inactive_days: Some(120),
        ..RankingPolicy::default()
    };
    let outcome = rank(&api, &pool, &policy, &telemetry).await;

    assert!(outcome.ranked.is_empty());
    assert_eq!(outcome.scored, 0);
    assert_eq!(telemetry.get(Counter::FilteredInactive), 1);
    assert_eq!(telemetry.get(Counter::CandidatesScored), 0);
}

#[tokio::test]
async fn disabled_recency_filter_keeps_inactive_candidate() {
    let mut stale = repo("stale", "old-tool", 80);
    stale.pushed_at = Some(days_ago(200));
    let api = FakeApi::new()
        .search_page(1, vec![stale.clone()])
        .candidate("stale", vec![stale]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let policy = RankingPolicy {
        max_inactive_days: None,
        ..RankingPolicy::default()
    };
    let outcome = rank(&api, &pool, &policy, &telemetry).await;

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.ranked[0].score.activity_recency, 0.0);
}

#[tokio::test]
async fn seed_repo_stars_add_flat_bonus() {
    let api = FakeApi::new()
        .search_page(
            1,
            vec![repo("popular", "seed", 600), repo("modest", "seed", 100)],
        )
        .candidate("popular", vec![repo("popular", "lib", 50)])
        .candidate("modest", vec![repo("modest", "lib", 50)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let outcome = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;

    assert_eq!(outcome.ranked.len(), 2);
    let popular = &outcome.ranked[0];
    let modest = &outcome.ranked[1];
    assert_eq!(popular.candidate.login, "popular");

    let weights = RankingPolicy::default().weights;
    let weighted_sum = |s: &talent_finder::ScoreBreakdown| {
        weights.language_overlap * s.language_overlap
            + weights.repo_quality * s.repo_quality
            + weights.activity_recency * s.activity_recency
            + weights.followers * s.followers
            + weights.top_repo * s.top_repo
    };

    assert_eq!(popular.score.seed_bonus, 0.05);
    assert_eq!(modest.score.seed_bonus, 0.0);
    assert!((popular.score.total - (weighted_sum(&popular.score) + 0.05)).abs() < 1e-12);
    assert!((modest.score.total - weighted_sum(&modest.score)).abs() < 1e-12);
    assert!((popular.score.total - modest.score.total - 0.05).abs() < 1e-12);
}

#[tokio::test]
async fn organizations_never_reach_the_ranked_list() {
    let mut miscategorized = user("megacorp");
    miscategorized.account_type = AccountType::Organization;
    let api = FakeApi::new()
        .search_page(
            1,
            vec![
                repo("megacorp", "sdk", 900),
                org_repo("acme", "tool", 700),
                repo("alice", "cli", 300),
            ],
        )
        .contributors("acme/tool", vec![contributor("bob", 30)])
        .user(miscategorized)
        .repos("megacorp", vec![repo("megacorp", "sdk", 900)])
        .candidate("alice", vec![repo("alice", "cli", 300)])
        .candidate("bob", vec![repo("bob", "lib", 20)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;
    assert_eq!(pool.len(), 3);

    let outcome = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;

    let logins: Vec<_> = outcome
        .ranked
        .iter()
        .map(|r| r.candidate.login.as_str())
        .collect();
    assert!(!logins.contains(&"megacorp"));
    assert!(!logins.contains(&"acme"));
    assert_eq!(logins.len(), 2);
    assert_eq!(telemetry.get(Counter::FilteredNotIndividual), 1);
}

#[tokio::test]
async fn young_and_missing_accounts_are_filtered() {
    let mut young = user("young");
    young.created_at = Some(days_ago(100));
    let api = FakeApi::new()
        .search_page(
            1,
            vec![repo("young", "r", 50), repo("ghost", "r", 50), repo("alice", "r", 50)],
        )
        .user(young)
        .repos("young", vec![repo("young", "r", 50)])
        .candidate("alice", vec![repo("alice", "r", 50)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let outcome = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(telemetry.get(Counter::FilteredAccountAge), 1);
    assert_eq!(telemetry.get(Counter::FilteredNotFound), 1);
    // Filtered on age before the repo list was needed.
    assert_eq!(api.inner().repo_calls("young"), 0);
}

#[tokio::test]
async fn ranked_list_is_bounded_sorted_and_stable() {
    let logins = ["first", "second", "third", "fourth"];
    let mut api = FakeApi::new().search_page(
        1,
        logins.iter().map(|login| repo(login, "seed", 100)).collect(),
    );
    for login in logins {
        api = api.candidate(login, vec![repo(login, "lib", 50)]);
    }
    // "fourth" is strictly better than the others, which tie.
    api = api.candidate("fourth", vec![repo("fourth", "lib", 5000)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let policy = RankingPolicy {
        max_candidates: 3,
        ..RankingPolicy::default()
    };
    let outcome = rank(&api, &pool, &policy, &telemetry).await;

    let order: Vec<_> = outcome
        .ranked
        .iter()
        .map(|r| r.candidate.login.as_str())
        .collect();
    assert_eq!(order, vec!["fourth", "first", "second"]);
    assert!(outcome
        .ranked
        .windows(2)
        .all(|pair| pair[0].score.total >= pair[1].score.total));
    assert_eq!(outcome.scored, 4);
}

#[tokio::test]
async fn forks_and_archived_repos_do_not_score() {
    let mut fork = repo("alice", "famous-fork", 90_000);
    fork.is_fork = true;
    let mut archived = repo("alice", "old-hit", 50_000);
    archived.is_archived = true;
    let api = FakeApi::new()
        .search_page(1, vec![repo("alice", "cli", 10)])
        .candidate("alice", vec![fork, archived, repo("alice", "cli", 10)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let outcome = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;

    let candidate = &outcome.ranked[0].candidate;
    assert_eq!(candidate.repos.len(), 1);
    assert_eq!(candidate.repos[0].full_name, "alice/cli");
}

#[tokio::test]
async fn each_login_is_fetched_at_most_once() {
    let api = FakeApi::new()
        .search_page(
            1,
            vec![
                repo("alice", "one", 100),
                repo("alice", "two", 200),
                org_repo("acme", "tool", 700),
                org_repo("acme", "lib", 600),
            ],
        )
        .contributors("acme/tool", vec![contributor("alice", 10)])
        .contributors("acme/lib", vec![contributor("alice", 5)])
        .candidate("alice", vec![repo("alice", "one", 100)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;
    assert_eq!(pool.len(), 1);

    let outcome = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;
    // A second ranking pass over the same pool is served from the cache.
    let again = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;

    assert_eq!(outcome.ranked, again.ranked);
    assert_eq!(api.inner().user_calls("alice"), 1);
    assert_eq!(api.inner().repo_calls("alice"), 1);
    assert_eq!(telemetry.get(Counter::UserFetches), 1);
    assert_eq!(telemetry.get(Counter::UserCacheHits), 1);
    assert_eq!(telemetry.get(Counter::RepoCacheHits), 1);
}

#[tokio::test]
async fn failed_hydration_discards_only_that_owner() {
    let api = FakeApi::new()
        .search_page(
            1,
            vec![repo("flaky", "r", 50), repo("broken", "r", 50), repo("alice", "r", 50)],
        )
        .user_error("flaky", transient("user"))
        .user(user("broken"))
        .repos_error("broken", transient("repos"))
        .candidate("alice", vec![repo("alice", "r", 50)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let outcome = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;
    let _ = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;

    assert_eq!(outcome.ranked.len(), 1);
    assert!(outcome.aborted.is_none());
    assert_eq!(telemetry.get(Counter::FilteredFetchFailed), 4);
    // Failures are memoized: the second pass never hits the network.
    assert_eq!(api.inner().user_calls("flaky"), 1);
    assert_eq!(api.inner().repo_calls("broken"), 1);
    assert_eq!(telemetry.get(Counter::FetchFailures), 2);
}

#[tokio::test]
async fn rate_limit_ends_ranking_with_scored_candidates() {
    let api = FakeApi::new()
        .search_page(
            1,
            vec![repo("alice", "r", 50), repo("limited", "r", 50), repo("zoe", "r", 50)],
        )
        .candidate("alice", vec![repo("alice", "r", 50)])
        .user_error("limited", rate_limited("user"))
        .candidate("zoe", vec![repo("zoe", "r", 50)]);
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let outcome = rank(&api, &pool, &RankingPolicy::default(), &telemetry).await;

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.ranked[0].candidate.login, "alice");
    assert!(matches!(outcome.aborted, Some(ApiError::RateLimited { .. })));
    assert_eq!(api.inner().user_calls("zoe"), 0);
}

#[tokio::test]
async fn authentication_failure_aborts_ranking() {
    let api = FakeApi::new()
        .search_page(1, vec![repo("alice", "r", 50)])
        .user_error(
            "alice",
            ApiError::Authentication {
                message: "Bad credentials".to_string(),
            },
        );
    let (api, telemetry) = cached(api);
    let pool = discover(&api, &telemetry, 10).await;

    let result = rank_candidates(
        &api,
        &pool,
        &go_profile(),
        &RankingPolicy::default(),
        &telemetry,
        now(),
    )
    .await;

    assert!(matches!(result, Err(RankingError::Api(_))));
}
