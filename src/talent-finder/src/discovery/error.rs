//! Discovery error types.

use crate::api::ApiError;
use thiserror::Error;

/// Errors that end discovery without a usable seed pool.
///
/// Per-page and per-repo failures are logged and skipped, and rate limit
/// exhaustion ends the phase with a partial pool, so only fatal API errors
/// surface here.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// GitHub API error that aborts the run.
    #[error("GitHub API error: {0}")]
    Api(#[from] ApiError),
}
