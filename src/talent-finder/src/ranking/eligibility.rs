//! Eligibility filters applied before scoring.

use crate::api::Repo;
use chrono::{DateTime, Utc};

const DAYS_PER_YEAR: f64 = 365.0;

/// Account age in years, `None` when the creation time is unknown.
#[must_use]
pub fn account_age_years(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<f64> {
    created_at.map(|created| (now - created).num_days() as f64 / DAYS_PER_YEAR)
}

/// Returns true if the account is at least `min_years` old.
///
/// Unknown creation times fail the check.
#[must_use]
pub fn meets_min_age(created_at: Option<DateTime<Utc>>, min_years: f64, now: DateTime<Utc>) -> bool {
    created_at.is_some_and(|created| {
        let min_days = (min_years * DAYS_PER_YEAR).floor() as i64;
        (now - created).num_days() >= min_days
    })
}

/// Repos owned by `login`, excluding forks and archived repos, most stars
/// first. Equal star counts keep their listing order.
#[must_use]
pub fn owned_repos(login: &str, repos: Vec<Repo>) -> Vec<Repo> {
    let mut owned: Vec<Repo> = repos
        .into_iter()
        .filter(|r| r.is_eligible() && r.owner.eq_ignore_ascii_case(login))
        .collect();
    owned.sort_by(|a, b| b.stars.cmp(&a.stars));
    owned
}

/// Returns true if any repo was pushed within `max_inactive_days` of `now`.
#[must_use]
pub fn is_recently_active(repos: &[Repo], max_inactive_days: u32, now: DateTime<Utc>) -> bool {
    repos
        .iter()
        .filter_map(|r| r.days_since_push(now))
        .any(|days| days <= i64::from(max_inactive_days))
}
