//! Cache key schema.

use std::fmt;

/// Endpoint family a cached response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// `/users/{login}`.
    User,
    /// `/users/{login}/repos`.
    Repos,
    /// `/repos/{owner}/{repo}/contributors`.
    Contributors,
}

/// `(endpoint kind, subject)` where the subject is a login or a repo full name.
///
/// Subjects are compared case-insensitively, matching GitHub's login rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: EndpointKind,
    subject: String,
}

impl CacheKey {
    /// Creates a key, normalizing the subject.
    #[must_use]
    pub fn new(kind: EndpointKind, subject: &str) -> Self {
        Self {
            kind,
            subject: subject.to_lowercase(),
        }
    }

    /// Endpoint kind.
    #[must_use]
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    /// Normalized subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.kind, self.subject)
    }
}
