//! View/session controller state.
//!
//! All application state lives here: the session, the pasted text, the
//! selected period, the last result, the loading flag and the error
//! message. Which screen to show is a pure function of this state,
//! re-derived on every render.
//!
//! Network operations follow one shape: `begin_request()` flips `loading`
//! on and hands out a sequence number; the matching `complete_*` call flips
//! `loading` off and sets exactly one of {result, error}. A completion
//! whose sequence is older than the latest issued request is discarded, so
//! overlapping requests cannot clobber newer state.

use timefree_core::{AnalysisResult, Session, TimePeriod};

/// The screen selected by the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Not signed in, manual mode off.
    Login,
    /// Manual text entry, independent of any session.
    ManualEntry,
    /// Signed-in dashboard.
    Dashboard,
}

/// Sequence number identifying an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestSeq(u64);

/// All mutable application state.
#[derive(Debug, Default)]
pub struct AppState {
    session: Option<Session>,
    calendar_text: String,
    period: TimePeriod,
    result: Option<AnalysisResult>,
    loading: bool,
    error: Option<String>,
    manual_mode: bool,
    latest_seq: u64,
}

impl AppState {
    /// Selects the screen to render. Manual mode wins over the session;
    /// without either, the login screen shows.
    pub fn screen(&self) -> Screen {
        if self.manual_mode {
            Screen::ManualEntry
        } else if self.session.is_none() {
            Screen::Login
        } else {
            Screen::Dashboard
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn calendar_text(&self) -> &str {
        &self.calendar_text
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn manual_mode(&self) -> bool {
        self.manual_mode
    }

    pub fn set_calendar_text(&mut self, text: impl Into<String>) {
        self.calendar_text = text.into();
    }

    pub fn set_period(&mut self, period: TimePeriod) {
        self.period = period;
    }

    pub fn set_manual_mode(&mut self, manual: bool) {
        self.manual_mode = manual;
    }

    /// Restores a session loaded from storage at startup.
    pub fn restore_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Restores a cached result loaded from storage at startup.
    pub fn restore_result(&mut self, result: AnalysisResult) {
        self.result = Some(result);
    }

    /// Records an error that did not come from a request completion
    /// (local validation, callback failure).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Starts a network operation: clears the previous outcome, flips
    /// `loading` on, and returns the sequence number the completion must
    /// present.
    pub fn begin_request(&mut self) -> RequestSeq {
        self.latest_seq += 1;
        self.loading = true;
        self.error = None;
        self.result = None;
        RequestSeq(self.latest_seq)
    }

    /// Completes an analysis request. Returns false (and changes nothing)
    /// when the completion is stale.
    pub fn complete_analysis(
        &mut self,
        seq: RequestSeq,
        outcome: Result<AnalysisResult, String>,
    ) -> bool {
        if !self.accept(seq) {
            return false;
        }
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(message) => self.error = Some(message),
        }
        true
    }

    /// Completes a credential exchange. Returns false when stale.
    pub fn complete_login(&mut self, seq: RequestSeq, outcome: Result<Session, String>) -> bool {
        if !self.accept(seq) {
            return false;
        }
        match outcome {
            Ok(session) => self.session = Some(session),
            Err(message) => self.error = Some(message),
        }
        true
    }

    /// Completes a calendar-authorization hand-off. Success carries no
    /// payload; the grant lives backend-side. Returns false when stale.
    pub fn complete_connect(&mut self, seq: RequestSeq, outcome: Result<(), String>) -> bool {
        if !self.accept(seq) {
            return false;
        }
        if let Err(message) = outcome {
            self.error = Some(message);
        }
        true
    }

    /// Returns to the entry screen: clears result, pasted text and error.
    /// The session, manual mode and period are untouched.
    pub fn reset(&mut self) {
        self.result = None;
        self.calendar_text.clear();
        self.error = None;
    }

    /// Returns to first-load state: clears the session, manual mode, and
    /// everything `reset` clears.
    pub fn logout(&mut self) {
        self.session = None;
        self.manual_mode = false;
        self.loading = false;
        self.reset();
    }

    /// Validates a completion sequence; flips `loading` off when accepted.
    fn accept(&mut self, seq: RequestSeq) -> bool {
        if seq.0 != self.latest_seq {
            return false;
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timefree_core::{MeetingStats, StatValue, UserProfile};

    fn session() -> Session {
        Session::new(
            "t1",
            UserProfile {
                id: "u1".into(),
                name: "A".into(),
                email: "a@x.com".into(),
            },
        )
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            independence_percentage: 38,
            witty_message: "Take back your day.".into(),
            detailed_analysis: "Wall to wall.".into(),
            meeting_stats: MeetingStats {
                total_meetings: StatValue::Number(14.0),
                total_hours: StatValue::Number(11.5),
                avg_meeting_length: StatValue::Number(49.0),
                longest_meeting_free_block: "Friday afternoon".into(),
            },
            recommendations: vec![],
        }
    }

    #[test]
    fn screen_rule() {
        let mut state = AppState::default();
        assert_eq!(state.screen(), Screen::Login);

        state.restore_session(session());
        assert_eq!(state.screen(), Screen::Dashboard);

        // Manual mode wins regardless of the session.
        state.set_manual_mode(true);
        assert_eq!(state.screen(), Screen::ManualEntry);

        state.logout();
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn begin_request_clears_previous_outcome() {
        let mut state = AppState::default();
        state.set_error("old error");
        state.restore_result(result());

        state.begin_request();
        assert!(state.loading());
        assert!(state.result().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn completed_analysis_has_exactly_one_outcome() {
        let mut state = AppState::default();

        let seq = state.begin_request();
        assert!(state.complete_analysis(seq, Ok(result())));
        assert!(!state.loading());
        assert!(state.result().is_some());
        assert!(state.error().is_none());

        let seq = state.begin_request();
        assert!(state.complete_analysis(seq, Err("boom".into())));
        assert!(!state.loading());
        assert!(state.result().is_none());
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = AppState::default();

        let first = state.begin_request();
        let second = state.begin_request();

        // The older request finishes last; its outcome must not land.
        assert!(state.complete_analysis(second, Ok(result())));
        assert!(!state.complete_analysis(first, Err("stale failure".into())));

        assert!(!state.loading());
        assert!(state.result().is_some());
        assert!(state.error().is_none());
    }

    #[test]
    fn stale_completion_does_not_clear_loading() {
        let mut state = AppState::default();

        let first = state.begin_request();
        let _second = state.begin_request();

        assert!(!state.complete_analysis(first, Ok(result())));
        // The second request is still in flight.
        assert!(state.loading());
    }

    #[test]
    fn reset_keeps_session_and_manual_mode() {
        let mut state = AppState::default();
        state.restore_session(session());
        state.set_manual_mode(true);
        state.set_period(TimePeriod::ThisMonth);
        state.set_calendar_text("Mon 9am standup");
        state.restore_result(result());
        state.set_error("oops");

        state.reset();

        assert!(state.result().is_none());
        assert!(state.calendar_text().is_empty());
        assert!(state.error().is_none());
        assert!(state.session().is_some());
        assert!(state.manual_mode());
        assert_eq!(state.period(), TimePeriod::ThisMonth);
    }

    #[test]
    fn logout_clears_session_and_manual_mode() {
        let mut state = AppState::default();
        state.restore_session(session());
        state.set_manual_mode(true);
        state.restore_result(result());

        state.logout();

        assert!(state.session().is_none());
        assert!(!state.manual_mode());
        assert!(state.result().is_none());
        // Routes to login, not manual entry.
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn login_completion_sets_session() {
        let mut state = AppState::default();

        let seq = state.begin_request();
        assert!(state.complete_login(seq, Ok(session())));
        assert_eq!(state.screen(), Screen::Dashboard);
        assert!(state.error().is_none());

        let seq = state.begin_request();
        // A failed exchange must not clear an existing session.
        assert!(state.complete_login(seq, Err("rejected".into())));
        assert!(state.session().is_some());
        assert_eq!(state.error(), Some("rejected"));
    }

    #[test]
    fn connect_completion_only_carries_errors() {
        let mut state = AppState::default();

        let seq = state.begin_request();
        assert!(state.complete_connect(seq, Ok(())));
        assert!(!state.loading());
        assert!(state.error().is_none());

        let seq = state.begin_request();
        assert!(state.complete_connect(seq, Err("denied".into())));
        assert_eq!(state.error(), Some("denied"));
    }
}
