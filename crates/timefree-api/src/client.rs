//! Backend API client.
//!
//! A thin reqwest wrapper over the backend's `/api` surface. No retries:
//! every failure is surfaced once and the caller decides what to do.

use std::time::Duration;

use tracing::debug;
use url::Url;
use uuid::Uuid;

use timefree_core::{AnalysisResult, TimePeriod};

use crate::error::{ApiError, ApiResult};
use crate::types::{
    AuthorizationUrlResponse, LoginRequest, LoginResponse, ManualAnalysisRequest,
};

/// Client for the time-freedom analysis backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Creates a new client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Configuration(format!("invalid backend URL `{}`: {}", base_url, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchanges an identity-provider credential for a session.
    ///
    /// `POST /api/auth/google`.
    pub async fn exchange_credential(&self, credential: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            token: credential.to_string(),
        };

        let request = self
            .http_client
            .post(self.endpoint("auth/google"))
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&body).map_err(|e| {
                ApiError::Configuration(format!("failed to serialize request: {}", e))
            })?);

        let body = self.send("exchange_credential", request).await?;
        parse_body(&body)
    }

    /// Fetches the calendar-authorization URL the user must be redirected to.
    ///
    /// `GET /api/auth/google-calendar`.
    pub async fn calendar_authorization_url(&self, access_token: &str) -> ApiResult<String> {
        let request = self
            .http_client
            .get(self.endpoint("auth/google-calendar"))
            .bearer_auth(access_token);

        let body = self.send("calendar_authorization_url", request).await?;
        let response: AuthorizationUrlResponse = parse_body(&body)?;
        Ok(response.authorization_url)
    }

    /// Runs an analysis against the user's connected calendar.
    ///
    /// `POST /api/analyze-calendar-auto?time_period=<period>` with a bearer
    /// token and an empty body. Fails with an authorization error when
    /// calendar access was never granted.
    pub async fn analyze_auto(
        &self,
        access_token: &str,
        period: TimePeriod,
    ) -> ApiResult<AnalysisResult> {
        let request = self
            .http_client
            .post(self.endpoint("analyze-calendar-auto"))
            .query(&[("time_period", period.as_str())])
            .bearer_auth(access_token);

        let body = self.send("analyze_auto", request).await?;
        parse_body(&body)
    }

    /// Runs an analysis over pasted calendar text. No authentication.
    ///
    /// `POST /api/analyze-calendar`.
    pub async fn analyze_manual(
        &self,
        calendar_data: &str,
        period: TimePeriod,
    ) -> ApiResult<AnalysisResult> {
        let body = ManualAnalysisRequest {
            calendar_data: calendar_data.to_string(),
            time_period: period,
        };

        let request = self
            .http_client
            .post(self.endpoint("analyze-calendar"))
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&body).map_err(|e| {
                ApiError::Configuration(format!("failed to serialize request: {}", e))
            })?);

        let body = self.send("analyze_manual", request).await?;
        parse_body(&body)
    }

    /// Sends a request, maps transport and status errors, returns the body.
    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<String> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, operation, "sending backend request");

        let response = request
            .header("X-Request-Id", request_id.to_string())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Network("request timeout".to_string())
                } else if e.is_connect() {
                    ApiError::Network(format!("connection failed: {}", e))
                } else {
                    ApiError::Network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            debug!(%request_id, operation, status = status.as_u16(), "backend request failed");
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        debug!(%request_id, operation, "backend request succeeded");
        Ok(body)
    }

    /// Joins a path under the `/api` prefix.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        )
    }
}

/// Parses a success body, mapping parse failures to `InvalidResponse`.
fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {}", e)))
}
