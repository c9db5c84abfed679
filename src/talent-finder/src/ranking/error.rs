//! Ranking error types.

use crate::api::ApiError;
use thiserror::Error;

/// Errors that end ranking without a usable result.
///
/// Failed hydrations discard the owner and rate limit exhaustion ends the
/// phase with the candidates scored so far, so only fatal API errors
/// surface here.
#[derive(Debug, Error)]
pub enum RankingError {
    /// GitHub API error that aborts the run.
    #[error("GitHub API error: {0}")]
    Api(#[from] ApiError),
}
