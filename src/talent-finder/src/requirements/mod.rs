//! Requirement extraction from job descriptions.
//!
//! A lightweight lexicon matcher turns free text into a
//! [`RequirementProfile`]. It is deliberately simple: the pipeline only
//! needs languages for `language:` qualifiers and scoring, and a handful
//! of keywords for the description/readme clause.

mod lexicon;
mod matcher;
mod profile;

pub use matcher::TermMatcher;
pub use profile::RequirementProfile;

use lexicon::{
    ALIASES, FALLBACK_LANGUAGES, FRAMEWORKS, GENERAL_KEYWORDS, LANGUAGES, PAIRED_KEYWORDS,
};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// Loose token shape used for the language fallback.
const TOKEN_PATTERN: &str = r"[a-z][a-z0-9.+\-]{1,30}";

/// Extracts languages, frameworks and keywords from a job description.
///
/// When no language matches on word boundaries, common languages that
/// appear as loose tokens (e.g. `python` in `3python`) are used instead.
#[must_use]
pub fn extract_requirements(job_text: &str) -> RequirementProfile {
    let text = normalize(job_text);

    let mut languages: BTreeSet<String> = found(LANGUAGES, &text);
    if languages.is_empty() {
        languages = fallback_languages(&text);
    }
    let frameworks: BTreeSet<String> = found(FRAMEWORKS, &text)
        .into_iter()
        .map(|term| canonical(&term))
        .collect();
    let mut keywords: BTreeSet<String> = found(GENERAL_KEYWORDS, &text);

    if PAIRED_KEYWORDS.iter().any(|k| keywords.contains(*k)) {
        keywords.extend(PAIRED_KEYWORDS.iter().map(|k| (*k).to_string()));
    }

    debug!(
        languages = languages.len(),
        frameworks = frameworks.len(),
        keywords = keywords.len(),
        "Extracted requirements"
    );
    RequirementProfile::new(languages, frameworks, keywords)
}

/// Lowercases and collapses whitespace.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn fallback_languages(text: &str) -> BTreeSet<String> {
    let Ok(token) = Regex::new(TOKEN_PATTERN) else {
        return BTreeSet::new();
    };
    let tokens: BTreeSet<&str> = token.find_iter(text).map(|m| m.as_str()).collect();
    FALLBACK_LANGUAGES
        .iter()
        .filter(|language| tokens.contains(*language))
        .map(|language| (*language).to_string())
        .collect()
}

fn found(lexicon: &[&str], text: &str) -> BTreeSet<String> {
    TermMatcher::new(lexicon)
        .find_all(text)
        .map(str::to_string)
        .collect()
}

fn canonical(term: &str) -> String {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == term)
        .map_or(term, |(_, canonical)| *canonical)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_sorted_requirements() {
        let profile = extract_requirements(
            "Senior Backend Engineer\n\nWe use   Python and Go with FastAPI, k8s and Kafka. \
             Experience with distributed systems and CI is a plus.",
        );

        assert_eq!(profile.languages(), &["go".to_string(), "python".to_string()]);
        assert_eq!(
            profile.frameworks().iter().collect::<Vec<_>>(),
            vec!["fastapi", "kafka", "kubernetes"]
        );
        assert_eq!(
            profile.keywords().iter().collect::<Vec<_>>(),
            vec!["cd", "ci", "distributed systems"]
        );
    }

    #[test]
    fn aliases_fold_onto_canonical_terms() {
        let profile = extract_requirements("React with NextJS and Next.js, sklearn");
        let frameworks: Vec<_> = profile.frameworks().iter().collect();
        assert_eq!(frameworks, vec!["next.js", "react", "scikit-learn"]);
    }

    #[test]
    fn falls_back_to_loose_language_tokens() {
        let profile = extract_requirements("Stack: 2python/3java, some rust2 work");
        assert_eq!(profile.languages(), &["java".to_string(), "python".to_string()]);
    }

    #[test]
    fn fallback_is_unused_when_a_language_matched() {
        let profile = extract_requirements("Rust services, plus 2python scripts");
        assert_eq!(profile.languages(), &["rust".to_string()]);
    }

    #[test]
    fn empty_text_yields_empty_profile() {
        assert!(extract_requirements("   ").is_empty());
    }
}
