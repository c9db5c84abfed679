//! Run summary types.

use super::phase::PhaseStatus;
use crate::discovery::DiscoveryOutcome;
use crate::ranking::RankingOutcome;
use crate::telemetry::{Counter, TelemetrySnapshot};
use serde::Serialize;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Number of search queries built.
    pub queries_built: usize,

    /// Owners in the seed pool after discovery.
    pub seed_pool_size: usize,

    /// Candidates that passed every filter and were scored.
    pub candidates_scored: usize,

    /// Candidates in the final list.
    pub candidates_ranked: usize,

    /// Fetches that failed after retries, across both phases.
    pub fetch_failures: u64,

    /// Records skipped because they could not be decoded.
    pub malformed_records: u64,

    /// How discovery ended.
    pub discovery: PhaseStatus,

    /// How ranking ended.
    pub ranking: PhaseStatus,

    /// Counters snapshotted after discovery.
    pub discovery_telemetry: TelemetrySnapshot,

    /// Counters snapshotted after ranking.
    pub ranking_telemetry: TelemetrySnapshot,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records the discovery phase.
    pub fn record_discovery(&mut self, outcome: &DiscoveryOutcome, telemetry: TelemetrySnapshot) {
        self.seed_pool_size = outcome.pool.len();
        self.discovery = PhaseStatus::from(outcome.aborted.as_ref());
        self.discovery_telemetry = telemetry;
    }

    /// Records the ranking phase.
    pub fn record_ranking(&mut self, outcome: &RankingOutcome, telemetry: TelemetrySnapshot) {
        self.candidates_scored = outcome.scored;
        self.candidates_ranked = outcome.ranked.len();
        self.ranking = PhaseStatus::from(outcome.aborted.as_ref());
        self.ranking_telemetry = telemetry;
    }

    /// Records run-wide failure counters from a full telemetry snapshot.
    pub fn record_failures(&mut self, telemetry: &TelemetrySnapshot) {
        self.fetch_failures = telemetry.get(Counter::FetchFailures.name()).unwrap_or_default();
        self.malformed_records = telemetry.get(Counter::MalformedRecords.name()).unwrap_or_default();
    }

    /// Returns true if discovery produced no owners.
    #[must_use]
    pub fn nothing_discovered(&self) -> bool {
        self.seed_pool_size == 0
    }

    /// Returns true if any fetch failed or a phase ended early.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.fetch_failures > 0 || self.discovery.is_aborted() || self.ranking.is_aborted()
    }

    /// Returns true if both phases completed without failed fetches.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
            && self.discovery == PhaseStatus::Completed
            && self.ranking == PhaseStatus::Completed
    }
}
