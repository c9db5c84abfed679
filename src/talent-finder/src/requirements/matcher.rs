//! Whole-term matching over free text.

use regex::{Regex, RegexBuilder};

/// Matches a fixed set of terms as whole words, case-insensitively.
///
/// `+` and `#` count as word characters so that `c` does not match inside
/// `c++` or `c#`.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    terms: Vec<(String, Regex)>,
}

impl TermMatcher {
    /// Compiles a matcher for `terms`. Terms that fail to compile are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .filter_map(|term| {
                let term = term.as_ref().trim().to_lowercase();
                if term.is_empty() {
                    return None;
                }
                let pattern = format!(r"(?:^|[^a-z0-9+#]){}(?:$|[^a-z0-9+#])", regex::escape(&term));
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|regex| (term, regex))
            })
            .collect();
        Self { terms }
    }

    /// Terms found in `text`, in the order they were given.
    pub fn find_all<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a str> + 'a {
        let text = text.to_owned();
        self.terms
            .iter()
            .filter(move |(_, regex)| regex.is_match(&text))
            .map(|(term, _)| term.as_str())
    }

    /// Returns true if any term occurs in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.terms.iter().any(|(_, regex)| regex.is_match(text))
    }
}
