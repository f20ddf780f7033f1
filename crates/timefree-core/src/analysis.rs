//! Analysis result types.
//!
//! These mirror the backend's response model. The result is produced
//! entirely by the backend; the client only stores and renders it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The outcome of a calendar analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Time-freedom score, 0-100. Higher means fewer meetings own your day.
    pub independence_percentage: u8,

    /// One-line verdict from the backend.
    pub witty_message: String,

    /// Longer prose analysis of the meeting patterns.
    pub detailed_analysis: String,

    /// Aggregate meeting statistics.
    pub meeting_stats: MeetingStats,

    /// Actionable suggestions for reclaiming time.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Aggregate statistics for the analyzed period.
///
/// The backend's degraded path reports the numeric fields as prose
/// ("Unknown", "Too many"), so each is a number-or-text value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingStats {
    /// Number of meetings in the period.
    pub total_meetings: StatValue,

    /// Hours spent in meetings.
    pub total_hours: StatValue,

    /// Average meeting length in minutes.
    pub avg_meeting_length: StatValue,

    /// Description of the longest meeting-free block.
    pub longest_meeting_free_block: String,
}

/// A statistic that is usually a number but may degrade to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    /// A numeric value.
    Number(f64),
    /// A textual stand-in when the backend could not compute a number.
    Text(String),
}

impl StatValue {
    /// Returns the numeric value, if this statistic has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Render integral values without a trailing ".0".
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{:.1}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}
