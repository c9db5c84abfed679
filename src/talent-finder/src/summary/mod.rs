//! Run summary types and helpers.

mod phase;
mod run_summary;

pub use phase::PhaseStatus;
pub use run_summary::RunSummary;
