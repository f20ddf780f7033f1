//! Application controller.
//!
//! Owns the state, the backend client and the local stores, and runs the
//! operations the screens expose: sign in, connect calendar, analyze
//! (manual and automatic), reset, logout. Every failure lands in the state
//! as a single user-visible message; nothing here retries.

use std::time::Duration;

use tracing::{info, warn};

use timefree_api::{ApiError, BackendClient};
use timefree_core::{Session, TimePeriod};

use crate::callback::{CallbackOutcome, CallbackServer};
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::state::{AppState, RequestSeq};
use crate::store::{CachedAnalysis, ResultCache, SessionStore};

/// Shown when manual analyze is attempted with no calendar text.
pub const MSG_EMPTY_CALENDAR: &str = "Paste some calendar data before analyzing.";

/// Shown when automatic analyze hits a 401-equivalent response.
pub const MSG_AUTHORIZATION_REQUIRED: &str =
    "Calendar access has not been granted yet. Run `timefree connect` first.";

/// Generic analyze fallback when the backend supplies no detail.
pub const MSG_ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";

/// Generic sign-in fallback when the backend supplies no detail.
pub const MSG_LOGIN_FAILED: &str = "Sign-in failed. Please try again.";

/// Shown when the authorization redirect reports an error.
pub const MSG_AUTH_CALLBACK_FAILED: &str = "Calendar authorization was denied or failed.";

/// Shown when the authorization URL could not be fetched.
pub const MSG_AUTH_URL_FAILED: &str =
    "Could not start calendar authorization. Please try again.";

/// The timefree application: state plus its collaborators.
#[derive(Debug)]
pub struct App {
    state: AppState,
    client: BackendClient,
    sessions: SessionStore,
    results: ResultCache,
    callback_ports: (u16, u16),
    callback_timeout: Duration,
}

impl App {
    /// Builds the application from a resolved configuration.
    pub fn new(config: &AppConfig) -> ClientResult<Self> {
        let client = BackendClient::new(
            &config.backend.base_url,
            Duration::from_secs(config.backend.timeout),
        )
        .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            state: AppState::default(),
            client,
            sessions: SessionStore::new(config.session_path()),
            results: ResultCache::new(config.analysis_cache_path()),
            callback_ports: (config.callback.port_min, config.callback.port_max),
            callback_timeout: Duration::from_secs(config.callback.timeout),
        })
    }

    /// Restores persisted state: the session and the last cached result.
    ///
    /// Corrupt store files are logged and treated as absent rather than
    /// blocking startup.
    pub fn init(&mut self) {
        match self.sessions.load() {
            Ok(true) => {
                if let Some(session) = self.sessions.get() {
                    info!(user = %session.user.email, "restored session");
                    self.state.restore_session(session);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("could not restore session: {}", e),
        }

        match self.results.load() {
            Ok(true) => {
                if let Some(cached) = self.results.get() {
                    self.state.set_period(cached.period);
                    self.state.restore_result(cached.result);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("could not restore cached analysis: {}", e),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Exchanges an identity credential for a session.
    ///
    /// On success the session is persisted and set in state; on a backend
    /// failure the state carries the detail message (or a generic
    /// fallback) and no session is created.
    pub async fn sign_in(&mut self, credential: &str) -> ClientResult<()> {
        let seq = self.state.begin_request();

        let outcome = match self.client.exchange_credential(credential).await {
            Ok(response) => {
                let session = Session::new(response.access_token, response.user);
                self.sessions.set(session.clone())?;
                info!(user = %session.user.email, "signed in");
                Ok(session)
            }
            Err(e) => Err(login_error_message(&e)),
        };

        self.state.complete_login(seq, outcome);
        Ok(())
    }

    /// Requests calendar authorization: fetches the authorization URL,
    /// hands the browser off to it, and waits for the loopback redirect.
    pub async fn connect_calendar(&mut self) -> ClientResult<()> {
        let Some(access_token) = self.state.session().map(|s| s.access_token.clone()) else {
            return Err(ClientError::Input(
                "not signed in; run `timefree login` first".to_string(),
            ));
        };

        let seq = self.state.begin_request();

        let auth_url = match self.client.calendar_authorization_url(&access_token).await {
            Ok(url) => url,
            Err(e) => {
                let message = e
                    .detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| MSG_AUTH_URL_FAILED.to_string());
                self.state.complete_connect(seq, Err(message));
                return Ok(());
            }
        };

        let server = CallbackServer::bind(self.callback_ports)?;
        info!(port = server.port(), "waiting for authorization redirect");

        if let Err(e) = open::that(&auth_url) {
            warn!("failed to open browser: {}", e);
            eprintln!("\nPlease open this URL in your browser:\n\n{}\n", auth_url);
        }

        let outcome = match server.wait(self.callback_timeout) {
            Ok(CallbackOutcome::Success) => Ok(()),
            Ok(CallbackOutcome::Denied(detail)) => {
                if let Some(detail) = detail {
                    warn!("authorization denied: {}", detail);
                }
                Err(MSG_AUTH_CALLBACK_FAILED.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        self.state.complete_connect(seq, outcome);
        Ok(())
    }

    /// Runs the automatic analysis against the connected calendar.
    pub async fn analyze_auto(&mut self) -> ClientResult<()> {
        let Some(access_token) = self.state.session().map(|s| s.access_token.clone()) else {
            return Err(ClientError::Input(
                "not signed in; run `timefree login` first".to_string(),
            ));
        };

        let period = self.state.period();
        let seq = self.state.begin_request();

        let outcome = self
            .client
            .analyze_auto(&access_token, period)
            .await
            .map_err(|e| auto_analysis_error_message(&e));

        self.finish_analysis(seq, period, outcome);
        Ok(())
    }

    /// Runs the manual analysis over the pasted calendar text.
    ///
    /// Empty or whitespace-only text is rejected locally; no request is
    /// issued and `loading` is never set.
    pub async fn analyze_manual(&mut self) -> ClientResult<()> {
        if self.state.calendar_text().trim().is_empty() {
            self.state.set_error(MSG_EMPTY_CALENDAR);
            return Ok(());
        }

        let text = self.state.calendar_text().to_string();
        let period = self.state.period();
        let seq = self.state.begin_request();

        let outcome = self
            .client
            .analyze_manual(&text, period)
            .await
            .map_err(|e| manual_analysis_error_message(&e));

        self.finish_analysis(seq, period, outcome);
        Ok(())
    }

    /// Clears the result (state and cache), pasted text and error.
    pub fn reset(&mut self) {
        self.state.reset();
        if let Err(e) = self.results.clear() {
            warn!("could not clear cached analysis: {}", e);
        }
    }

    /// Signs out: clears state and removes the persisted session and
    /// cached result.
    pub fn logout(&mut self) {
        self.state.logout();
        if let Err(e) = self.sessions.clear() {
            warn!("could not clear session: {}", e);
        }
        if let Err(e) = self.results.clear() {
            warn!("could not clear cached analysis: {}", e);
        }
    }

    /// Applies an analysis outcome and caches successful results.
    fn finish_analysis(
        &mut self,
        seq: RequestSeq,
        period: TimePeriod,
        outcome: Result<timefree_core::AnalysisResult, String>,
    ) {
        let cached = outcome
            .as_ref()
            .ok()
            .map(|result| CachedAnalysis::new(result.clone(), period));

        if self.state.complete_analysis(seq, outcome) {
            if let Some(cached) = cached {
                if let Err(e) = self.results.set(cached) {
                    warn!("could not cache analysis: {}", e);
                }
            }
        }
    }
}

/// Maps a credential-exchange failure to a user message.
fn login_error_message(error: &ApiError) -> String {
    error
        .detail()
        .map(str::to_string)
        .unwrap_or_else(|| MSG_LOGIN_FAILED.to_string())
}

/// Maps an automatic-analysis failure to a user message. A 401-equivalent
/// gets the specific authorization-required message.
fn auto_analysis_error_message(error: &ApiError) -> String {
    if error.is_auth_required() {
        MSG_AUTHORIZATION_REQUIRED.to_string()
    } else {
        error
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| MSG_ANALYSIS_FAILED.to_string())
    }
}

/// Maps a manual-analysis failure to a user message. No authorization
/// special case: the manual path carries no token.
fn manual_analysis_error_message(error: &ApiError) -> String {
    error
        .detail()
        .map(str::to_string)
        .unwrap_or_else(|| MSG_ANALYSIS_FAILED.to_string())
}
