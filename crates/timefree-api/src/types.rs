//! Request and response bodies for the backend `/api` surface.

use serde::{Deserialize, Serialize};
use timefree_core::{TimePeriod, UserProfile};

/// Body for `POST /api/auth/google`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// The opaque identity credential obtained from the provider.
    pub token: String,
}

/// Response from `POST /api/auth/google`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Profile of the signed-in user.
    pub user: UserProfile,
}

/// Response from `GET /api/auth/google-calendar`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationUrlResponse {
    /// Provider consent page the user must be sent to.
    pub authorization_url: String,
}

/// Body for `POST /api/analyze-calendar`.
#[derive(Debug, Clone, Serialize)]
pub struct ManualAnalysisRequest {
    /// Free-text calendar data pasted or piped by the user.
    pub calendar_data: String,
    /// The period the data covers.
    pub time_period: TimePeriod,
}
