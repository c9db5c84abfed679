//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading and validation errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Api(#[from] crate::api::ApiError),

    /// Fatal discovery errors.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),

    /// Fatal ranking errors.
    #[error(transparent)]
    Ranking(#[from] crate::ranking::RankingError),

    /// Report rendering and writing errors.
    #[error(transparent)]
    Report(#[from] crate::report::ReportError),
}
