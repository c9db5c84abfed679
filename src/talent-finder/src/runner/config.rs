//! Runner configuration.

use crate::config::FinderConfig;
use std::path::{Path, PathBuf};

/// Default report file name.
pub const DEFAULT_REPORT_PATH: &str = "top_candidates.txt";

/// Configuration for a discovery-and-ranking run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Search, pool and scoring settings.
    finder: FinderConfig,
    /// Where the report is written.
    report_path: PathBuf,
    /// Whether to print a preview instead of writing the report.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(token: String, finder: FinderConfig, dry_run: bool) -> Self {
        Self {
            token,
            finder,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            dry_run,
        }
    }

    /// Sets a custom report path.
    pub fn with_report_path(mut self, report_path: PathBuf) -> Self {
        self.report_path = report_path;
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the finder settings.
    pub fn finder(&self) -> &FinderConfig {
        &self.finder
    }

    /// Returns the report path.
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
