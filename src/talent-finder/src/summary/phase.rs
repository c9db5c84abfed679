//! Phase status types.

use serde::Serialize;

/// How a pipeline phase ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseStatus {
    /// The phase has not run.
    #[default]
    NotRun,

    /// The phase ran to completion.
    Completed,

    /// The phase ended early and kept its partial results.
    Aborted {
        /// Error that ended the phase.
        reason: String,
    },
}

impl PhaseStatus {
    /// Returns true if the phase ended early.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// Returns a string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRun => "not run",
            Self::Completed => "completed",
            Self::Aborted { .. } => "aborted",
        }
    }
}

impl<E: std::fmt::Display> From<Option<&E>> for PhaseStatus {
    fn from(aborted: Option<&E>) -> Self {
        aborted.map_or(Self::Completed, |e| Self::Aborted {
            reason: e.to_string(),
        })
    }
}
