//! Repository search query construction.
//!
//! Queries follow the form the GitHub web UI accepts well:
//!
//! ```text
//! language:Go language:Python stars:>20 pushed:>=2024-01-31 (cli OR networking) in:description,readme
//! ```
//!
//! Multiple `language:` qualifiers are OR-ed by GitHub. Keyword groups are
//! capped at [`MAX_KEYWORDS_PER_QUERY`] terms; longer keyword lists are
//! split across several queries, issued in order.

use crate::requirements::RequirementProfile;
use chrono::{DateTime, Duration, Utc};

/// Maximum `language:` qualifiers per query.
pub const MAX_LANGUAGES_PER_QUERY: usize = 6;

/// Maximum OR-joined keyword terms per query.
pub const MAX_KEYWORDS_PER_QUERY: usize = 6;

/// Search gates applied to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySettings {
    /// Repos must have more than this many stars.
    pub min_stars: u32,
    /// Repos must have been pushed within this many days.
    pub pushed_within_days: u32,
    /// Upper bound on the number of queries, unlimited when `None`.
    pub max_queries: Option<usize>,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            min_stars: 20,
            pushed_within_days: crate::config::DEFAULT_SEARCH_WINDOW_DAYS,
            max_queries: None,
        }
    }
}

/// Builds the search query strings for a requirement profile.
///
/// `now` fixes the `pushed:>=` cutoff date, so the same profile, settings
/// and instant always produce the same queries.
#[must_use]
pub fn build_queries(
    profile: &RequirementProfile,
    settings: &QuerySettings,
    now: DateTime<Utc>,
) -> Vec<String> {
    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(settings.pushed_within_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .date_naive();

    let language_clause = profile
        .languages()
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .take(MAX_LANGUAGES_PER_QUERY)
        .map(|l| format!("language:{}", quote(l)))
        .collect::<Vec<_>>()
        .join(" ");
    let gates = format!(
        "stars:>{} pushed:>={}",
        settings.min_stars,
        cutoff.format("%Y-%m-%d")
    );

    let terms: Vec<String> = profile
        .search_terms()
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(quote)
        .collect();

    let keyword_clauses: Vec<String> = if terms.is_empty() {
        vec![String::new()]
    } else {
        terms
            .chunks(MAX_KEYWORDS_PER_QUERY)
            .map(|chunk| format!("({}) in:description,readme", chunk.join(" OR ")))
            .collect()
    };

    let limit = settings.max_queries.unwrap_or(usize::MAX);
    keyword_clauses
        .iter()
        .take(limit)
        .map(|keywords| {
            [language_clause.as_str(), gates.as_str(), keywords.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Quotes multi-word terms, leaves single tokens bare.
fn quote(term: &str) -> String {
    if term.contains(' ') {
        format!("\"{term}\"")
    } else {
        term.to_string()
    }
}
