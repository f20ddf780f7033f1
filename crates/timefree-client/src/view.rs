//! Screen rendering.
//!
//! One render path, keyed by the screen-selection rule, with shared
//! sub-views for the result panel and the entry hints. The three screens
//! are never duplicated trees; they only differ in header and hint.

use std::fmt::Write as _;

use timefree_core::AnalysisResult;

use crate::state::{AppState, Screen};

/// Renders the current screen to a terminal string.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    if let Some(error) = state.error() {
        let _ = writeln!(out, "error: {}", error);
        let _ = writeln!(out);
    }

    match state.screen() {
        Screen::Login => {
            let _ = writeln!(out, "timefree - How much of your day is actually yours?");
            let _ = writeln!(out);
            let _ = writeln!(out, "You are not signed in.");
            let _ = writeln!(out);
            let _ = writeln!(out, "  Sign in:          timefree login");
            let _ = writeln!(out, "  Or go manual:     timefree analyze  (paste calendar text)");
        }
        Screen::ManualEntry => {
            let _ = writeln!(out, "timefree - manual analysis");
            let _ = writeln!(out);
            match state.result() {
                Some(result) => out.push_str(&result_panel(result)),
                None => {
                    let _ = writeln!(out, "Period: {}", state.period().label());
                    let _ = writeln!(out);
                    let _ = writeln!(
                        out,
                        "Paste or pipe your calendar text to `timefree analyze`."
                    );
                }
            }
        }
        Screen::Dashboard => {
            // Session is always present on the dashboard.
            if let Some(session) = state.session() {
                let _ = writeln!(
                    out,
                    "Signed in as {} <{}>",
                    session.user.name, session.user.email
                );
                let _ = writeln!(out);
            }
            match state.result() {
                Some(result) => out.push_str(&result_panel(result)),
                None => {
                    let _ = writeln!(out, "Period: {}", state.period().label());
                    let _ = writeln!(out);
                    let _ = writeln!(out, "  Analyze your calendar:   timefree analyze --auto");
                    let _ = writeln!(out, "  Connect your calendar:   timefree connect");
                }
            }
        }
    }

    out
}

/// Renders an analysis result. Shared by every screen.
pub fn result_panel(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let stats = &result.meeting_stats;

    let _ = writeln!(
        out,
        "You are {}% independent.",
        result.independence_percentage
    );
    let _ = writeln!(out, "{}", result.witty_message);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Meetings:            {}", stats.total_meetings);
    let _ = writeln!(out, "  Hours in meetings:   {}", stats.total_hours);
    let _ = writeln!(out, "  Average length:      {} min", stats.avg_meeting_length);
    let _ = writeln!(
        out,
        "  Longest free block:  {}",
        stats.longest_meeting_free_block
    );

    if !result.recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendations:");
        for recommendation in &result.recommendations {
            let _ = writeln!(out, "  - {}", recommendation);
        }
    }

    if !result.detailed_analysis.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", result.detailed_analysis);
    }

    out
}

/// Renders a result as JSON for scripting.
pub fn render_json(result: &AnalysisResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}
