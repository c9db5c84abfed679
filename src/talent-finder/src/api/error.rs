//! GitHub API error types.

use thiserror::Error;

/// Errors surfaced by [`GitHubApi`](super::GitHubApi) implementations.
///
/// The type is `Clone` so the memoizing cache can replay a failed fetch
/// without issuing the request again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Timeout, connection failure or 5xx response.
    #[error("Transient network error during {operation}: {message}")]
    Transient { operation: String, message: String },

    /// The platform refused the request because the rate limit is spent.
    #[error("Rate limit exhausted during {operation}, reset at {reset_at:?}")]
    RateLimited {
        operation: String,
        /// Unix timestamp when the limit resets, when known.
        reset_at: Option<u64>,
    },

    /// Missing or rejected credential.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The response did not match the expected schema.
    #[error("Malformed response from {operation}: {message}")]
    MalformedResponse { operation: String, message: String },

    /// Any other non-success response.
    #[error("GitHub API error during {operation} (status {status:?}): {message}")]
    Unexpected {
        operation: String,
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    /// Returns true if a single backoff-and-retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::RateLimited { .. })
    }

    /// Returns true if the whole run must stop.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns true if the current phase must stop and keep what it has.
    #[must_use]
    pub fn aborts_phase(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        let transient = ApiError::Transient {
            operation: "search".to_string(),
            message: "502".to_string(),
        };
        let limited = ApiError::RateLimited {
            operation: "search".to_string(),
            reset_at: Some(10),
        };
        let auth = ApiError::Authentication {
            message: "bad credentials".to_string(),
        };
        let malformed = ApiError::MalformedResponse {
            operation: "user".to_string(),
            message: "missing login".to_string(),
        };

        assert!(transient.is_retryable() && !transient.aborts_phase());
        assert!(limited.is_retryable() && limited.aborts_phase());
        assert!(auth.is_fatal() && !auth.is_retryable());
        assert!(!malformed.is_retryable() && !malformed.is_fatal());
    }
}
