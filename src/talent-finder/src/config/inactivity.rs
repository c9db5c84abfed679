//! `max-inactive-days` setting.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Search window used when the recency filter is disabled.
pub const DEFAULT_SEARCH_WINDOW_DAYS: u32 = 365;

/// Largest accepted threshold, one hundred years.
pub const MAX_INACTIVE_DAYS: u32 = 36_500;

/// Recency threshold: a number of days, or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawInactivity")]
pub enum InactivityWindow {
    /// Candidates must have pushed within this many days.
    Days(u32),
    /// No recency filter.
    Disabled,
}

impl Default for InactivityWindow {
    fn default() -> Self {
        Self::Days(DEFAULT_SEARCH_WINDOW_DAYS)
    }
}

impl InactivityWindow {
    /// The threshold in days, `None` when disabled.
    #[must_use]
    pub fn days(self) -> Option<u32> {
        match self {
            Self::Days(days) => Some(days),
            Self::Disabled => None,
        }
    }

    /// Days used for the `pushed:>=` search qualifier.
    #[must_use]
    pub fn search_window_days(self) -> u32 {
        self.days().unwrap_or(DEFAULT_SEARCH_WINDOW_DAYS)
    }
}

impl FromStr for InactivityWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("disabled") {
            return Ok(Self::Disabled);
        }
        s.parse::<u32>()
            .map(Self::Days)
            .map_err(|_| format!("expected a number of days or \"disabled\", got '{s}'"))
    }
}

impl fmt::Display for InactivityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInactivity {
    Days(u32),
    Keyword(String),
}

impl TryFrom<RawInactivity> for InactivityWindow {
    type Error = String;

    fn try_from(raw: RawInactivity) -> Result<Self, Self::Error> {
        match raw {
            RawInactivity::Days(days) => Ok(Self::Days(days)),
            RawInactivity::Keyword(keyword) => keyword.parse(),
        }
    }
}
