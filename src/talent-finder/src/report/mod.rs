//! Human-readable output for ranked candidates.
//!
//! The report lists every ranked candidate with contact details and score
//! breakdown, followed by the run's telemetry. Dry runs render a short
//! preview of the top candidates instead of writing anything.

mod error;
mod renderer;

pub use error::ReportError;
pub use renderer::{create_handlebars_registry, ReportRenderer, PREVIEW_TEMPLATE, REPORT_TEMPLATE};

use crate::ranking::RankedCandidate;
use crate::requirements::RequirementProfile;
use crate::telemetry::TelemetrySnapshot;
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

/// Candidates shown in a dry-run preview.
pub const PREVIEW_LIMIT: usize = 5;

/// Top repos listed per candidate.
const REPORT_TOP_REPOS: usize = 3;

/// Renders the full text report.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_report(
    renderer: &ReportRenderer,
    profile: &RequirementProfile,
    ranked: &[RankedCandidate],
    telemetry: &TelemetrySnapshot,
) -> Result<String, ReportError> {
    let data = report_data(profile, ranked, telemetry);
    renderer.render(REPORT_TEMPLATE, &data)
}

/// Renders the dry-run preview of the top [`PREVIEW_LIMIT`] candidates.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_preview(
    renderer: &ReportRenderer,
    profile: &RequirementProfile,
    ranked: &[RankedCandidate],
) -> Result<String, ReportError> {
    let shown = &ranked[..ranked.len().min(PREVIEW_LIMIT)];
    let data = report_data(profile, shown, &TelemetrySnapshot::default());
    renderer.render(PREVIEW_TEMPLATE, &data)
}

/// Renders the report and writes it to `path`.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_report(
    renderer: &ReportRenderer,
    path: &Path,
    profile: &RequirementProfile,
    ranked: &[RankedCandidate],
    telemetry: &TelemetrySnapshot,
) -> Result<(), ReportError> {
    let content = render_report(renderer, profile, ranked, telemetry)?;
    std::fs::write(path, content).map_err(|e| ReportError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;
    info!(path = %path.display(), candidates = ranked.len(), "Wrote report");
    Ok(())
}

fn report_data(
    profile: &RequirementProfile,
    ranked: &[RankedCandidate],
    telemetry: &TelemetrySnapshot,
) -> Value {
    let candidates: Vec<Value> = ranked.iter().map(candidate_data).collect();
    json!({
        "requirements": {
            "languages": join_or_none(profile.languages().iter().map(String::as_str)),
            "frameworks": join_or_none(profile.frameworks().iter().map(String::as_str)),
            "keywords": join_or_none(profile.keywords().iter().map(String::as_str)),
        },
        "candidates": candidates,
        "telemetry": telemetry,
    })
}

fn candidate_data(entry: &RankedCandidate) -> Value {
    let candidate = &entry.candidate;
    let score = &entry.score;
    json!({
        "rank": entry.rank,
        "login": candidate.login,
        "name": candidate.display_name(),
        "html_url": candidate.html_url,
        "score": fixed(score.total),
        "total_stars": candidate.total_stars,
        "notable_repo": candidate.notable_repo,
        "discovered_via": candidate.discovered_via.as_str(),
        "top_repos": candidate.top_repo_names(REPORT_TOP_REPOS).join(", "),
        "languages": candidate.languages.join(", "),
        "contact": candidate.contact.summary(),
        "breakdown": {
            "language_overlap": fixed(score.language_overlap),
            "repo_quality": fixed(score.repo_quality),
            "activity_recency": fixed(score.activity_recency),
            "followers": fixed(score.followers),
            "top_repo": fixed(score.top_repo),
            "seed_bonus": fixed(score.seed_bonus),
        },
    })
}

fn fixed(value: f64) -> String {
    format!("{value:.4}")
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}
