//! Requirement profile consumed by query building and scoring.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skills inferred from a job description.
///
/// Immutable once built. Languages keep their insertion order (deduplicated
/// case-insensitively); frameworks and keywords are sorted sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementProfile {
    languages: Vec<String>,
    frameworks: BTreeSet<String>,
    keywords: BTreeSet<String>,
}

impl RequirementProfile {
    /// Builds a profile, trimming entries and dropping blanks and duplicates.
    pub fn new<L, F, K>(languages: L, frameworks: F, keywords: K) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for language in languages {
            let language = language.into().trim().to_string();
            if language.is_empty()
                || ordered
                    .iter()
                    .any(|seen| seen.eq_ignore_ascii_case(&language))
            {
                continue;
            }
            ordered.push(language);
        }

        Self {
            languages: ordered,
            frameworks: clean_set(frameworks),
            keywords: clean_set(keywords),
        }
    }

    /// Required languages, in order.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Framework and technology keywords.
    #[must_use]
    pub fn frameworks(&self) -> &BTreeSet<String> {
        &self.frameworks
    }

    /// Generic keywords.
    #[must_use]
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    /// Frameworks followed by keywords, without duplicates.
    #[must_use]
    pub fn search_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = Vec::new();
        for term in self.frameworks.iter().chain(self.keywords.iter()) {
            if !terms.contains(&term.as_str()) {
                terms.push(term);
            }
        }
        terms
    }

    /// Returns true if nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.frameworks.is_empty() && self.keywords.is_empty()
    }
}

fn clean_set<I>(items: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    items
        .into_iter()
        .map(|item| item.into().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_keep_order_and_dedupe() {
        let profile = RequirementProfile::new(
            ["Go", "Python", "go", " "],
            Vec::<String>::new(),
            Vec::<String>::new(),
        );
        assert_eq!(profile.languages(), &["Go".to_string(), "Python".to_string()]);
    }

    #[test]
    fn search_terms_dedupe_across_sets() {
        let profile = RequirementProfile::new(
            Vec::<String>::new(),
            ["grpc", "docker"],
            ["grpc", "ci"],
        );
        assert_eq!(profile.search_terms(), vec!["docker", "grpc", "ci"]);
    }
}
