//! Analysis time periods.
//!
//! The backend accepts the period as an opaque string, so the canonical
//! spellings defined here are the only contract. They use snake_case to
//! match the query-parameter convention of the automatic-analysis endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The window of calendar data an analysis covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    /// Today only.
    Today,
    /// The current week.
    #[default]
    ThisWeek,
    /// The current month.
    ThisMonth,
    /// A rolling window of recent days.
    RecentDays,
}

impl TimePeriod {
    /// All selectable periods, in display order.
    pub const ALL: [TimePeriod; 4] = [
        Self::Today,
        Self::ThisWeek,
        Self::ThisMonth,
        Self::RecentDays,
    ];

    /// The canonical wire spelling sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
            Self::RecentDays => "recent_days",
        }
    }

    /// A human-readable label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this week",
            Self::ThisMonth => "this month",
            Self::RecentDays => "recent days",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown period spelling.
#[derive(Debug, Clone, Error)]
#[error("unknown time period `{0}` (expected one of: today, this_week, this_month, recent_days)")]
pub struct PeriodParseError(String);

impl FromStr for TimePeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the legacy space-separated spelling from older clients.
        match s.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "today" => Ok(Self::Today),
            "this_week" => Ok(Self::ThisWeek),
            "this_month" => Ok(Self::ThisMonth),
            "recent_days" => Ok(Self::RecentDays),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}
