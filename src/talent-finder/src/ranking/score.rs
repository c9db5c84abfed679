//! Sub-scores and the weighted excellence score.
//!
//! Every sub-score is a pure function of already-fetched data and an
//! explicit `now`, so scores are reproducible and testable without a
//! network.

use super::weights::{
    ScoringWeights, ACTIVITY_FULL_CREDIT_DAYS, ACTIVITY_HORIZON_DAYS, CANDIDATE_LANGUAGE_LIMIT,
    FOLLOWER_SATURATION, NO_LANGUAGE_BASELINE, REPO_ACTIVE_DAYS, TOP_REPO_BONUS_COUNT,
};
use crate::api::Repo;
use chrono::{DateTime, Utc};
use serde::Serialize;

const STAR_FACTOR: f64 = 0.45;
const STAR_LOG_CAP: f64 = 1.5;
const FORK_FACTOR: f64 = 0.10;
const FORK_LOG_SCALE: f64 = 0.2;
const ACTIVE_FACTOR: f64 = 0.20;
const TESTS_FACTOR: f64 = 0.10;
const TESTS_HINT: f64 = 0.3;
const CI_FACTOR: f64 = 0.10;
const CI_HINT: f64 = 0.3;
const README_FACTOR: f64 = 0.05;
const README_HINT: f64 = 0.2;
const ISSUE_PENALTY: f64 = 0.2;
const ISSUE_PENALTY_MIN_OPEN: u64 = 100;
const ISSUE_PENALTY_MAX_STARS: u64 = 1000;

/// Per-candidate score components and their weighted total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Share of required languages the candidate uses, in [0, 1].
    pub language_overlap: f64,
    /// Mean quality of the scored repos, in [0, 1].
    pub repo_quality: f64,
    /// Freshness of the most recent push, in [0, 1].
    pub activity_recency: f64,
    /// Log-scaled follower count, in [0, 1].
    pub followers: f64,
    /// Mean quality of the best three repos, in [0, 1].
    pub top_repo: f64,
    /// Additive bonus from the discovering repo, outside the weighted sum.
    pub seed_bonus: f64,
    /// Weighted sum of the five components plus `seed_bonus`.
    pub total: f64,
}

/// Inputs to [`score_candidate`].
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    /// Scored repos, highest stars first.
    pub repos: &'a [Repo],
    /// Candidate languages, most used first.
    pub languages: &'a [String],
    /// Required languages from the requirement profile.
    pub required_languages: &'a [String],
    /// Follower count of the account.
    pub followers: u64,
    /// Stars of the repo that surfaced the candidate.
    pub seed_stars: u64,
}

/// Computes the full breakdown for one candidate.
#[must_use]
pub fn score_candidate(
    inputs: ScoreInputs<'_>,
    weights: &ScoringWeights,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let qualities: Vec<f64> = inputs.repos.iter().map(|r| repo_quality(r, now)).collect();

    let language_overlap = language_overlap(inputs.required_languages, inputs.languages);
    let repo_quality = mean(&qualities);
    let activity_recency = activity_recency(inputs.repos, now);
    let followers = follower_score(inputs.followers);
    let top_repo = top_repo_bonus(&qualities);
    let seed_bonus = weights.seed_bonus(inputs.seed_stars);

    let weighted = weights.language_overlap * language_overlap
        + weights.repo_quality * repo_quality
        + weights.activity_recency * activity_recency
        + weights.followers * followers
        + weights.top_repo * top_repo;

    ScoreBreakdown {
        language_overlap,
        repo_quality,
        activity_recency,
        followers,
        top_repo,
        seed_bonus,
        total: weighted + seed_bonus,
    }
}

/// Most used languages among `repos`, by repo count; ties keep first appearance.
#[must_use]
pub fn candidate_languages(repos: &[Repo]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        match counts.iter_mut().find(|(seen, _)| *seen == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language, 1)),
        }
    }
    // Stable sort keeps first appearance among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(CANDIDATE_LANGUAGE_LIMIT)
        .map(|(language, _)| language.to_string())
        .collect()
}

/// Fraction of required languages the candidate uses, ignoring case.
///
/// Returns a small baseline when nothing is required.
#[must_use]
pub fn language_overlap(required: &[String], candidate: &[String]) -> f64 {
    let mut wanted: Vec<String> = required.iter().map(|l| l.to_lowercase()).collect();
    wanted.sort();
    wanted.dedup();
    if wanted.is_empty() {
        return NO_LANGUAGE_BASELINE;
    }

    let matched = wanted
        .iter()
        .filter(|w| candidate.iter().any(|c| c.eq_ignore_ascii_case(w)))
        .count();
    matched as f64 / wanted.len() as f64
}

/// Quality heuristic for a single repo, in `[0, 1]`.
///
/// Forks and archived repos score zero.
#[must_use]
pub fn repo_quality(repo: &Repo, now: DateTime<Utc>) -> f64 {
    if !repo.is_eligible() {
        return 0.0;
    }

    let star_score = log10_at_least_one(repo.stars).min(STAR_LOG_CAP);
    let fork_score = (FORK_LOG_SCALE * log10_at_least_one(repo.forks)).min(1.0);
    let active = match repo.days_since_push(now) {
        Some(days) if days <= REPO_ACTIVE_DAYS => 1.0,
        _ => 0.0,
    };
    let tests = if repo.has_tests_hint { TESTS_HINT } else { 0.0 };
    let ci = if repo.has_ci_hint { CI_HINT } else { 0.0 };
    let penalty =
        if repo.open_issues > ISSUE_PENALTY_MIN_OPEN && repo.stars < ISSUE_PENALTY_MAX_STARS {
            ISSUE_PENALTY
        } else {
            0.0
        };

    let score = STAR_FACTOR * star_score
        + FORK_FACTOR * fork_score
        + ACTIVE_FACTOR * active
        + TESTS_FACTOR * tests
        + CI_FACTOR * ci
        + README_FACTOR * README_HINT
        - penalty;
    score.clamp(0.0, 1.0)
}

/// Recency of the freshest push: full credit within 30 days, decaying
/// linearly to zero at 90 days.
#[must_use]
pub fn activity_recency(repos: &[Repo], now: DateTime<Utc>) -> f64 {
    let Some(freshest) = repos.iter().filter_map(|r| r.days_since_push(now)).min() else {
        return 0.0;
    };

    if freshest <= ACTIVITY_FULL_CREDIT_DAYS {
        1.0
    } else if freshest >= ACTIVITY_HORIZON_DAYS {
        0.0
    } else {
        (ACTIVITY_HORIZON_DAYS - freshest) as f64
            / (ACTIVITY_HORIZON_DAYS - ACTIVITY_FULL_CREDIT_DAYS) as f64
    }
}

/// `log10(1 + followers)` normalized so 1000 followers saturate.
#[must_use]
pub fn follower_score(followers: u64) -> f64 {
    let score = (1.0 + followers as f64).log10() / (1.0 + FOLLOWER_SATURATION).log10();
    score.clamp(0.0, 1.0)
}

/// Mean of the best three repo quality scores.
#[must_use]
pub fn top_repo_bonus(qualities: &[f64]) -> f64 {
    let mut best = qualities.to_vec();
    best.sort_by(|a, b| b.total_cmp(a));
    best.truncate(TOP_REPO_BONUS_COUNT);
    mean(&best)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn log10_at_least_one(value: u64) -> f64 {
    (value.max(1) as f64).log10()
}
