//! Error types for backend API operations.

use thiserror::Error;

/// A specialized Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error that occurred while talking to the analysis backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-side configuration problem (bad base URL, etc).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Connection failed, timed out, or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the request for lack of authorization
    /// (401/403) - typically calendar access was never granted.
    #[error("authorization required: {0}")]
    AuthRequired(String),

    /// The backend returned a non-success status.
    #[error("backend error ({status}): {detail}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Backend-supplied detail, or the raw body when unparseable.
        detail: String,
    },

    /// The response body could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Builds the error matching a non-success HTTP status.
    ///
    /// 401 and 403 map to [`ApiError::AuthRequired`]; everything else maps
    /// to [`ApiError::Backend`]. The detail message is extracted from a
    /// FastAPI-style `{"detail": "..."}` body when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = detail_from_body(body)
            .unwrap_or_else(|| body.trim().to_string());
        match status {
            401 | 403 => Self::AuthRequired(detail),
            _ => Self::Backend { status, detail },
        }
    }

    /// Returns true if the request lacked authorization (401/403).
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired(_))
    }

    /// The backend-supplied detail message, if this error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::AuthRequired(detail) | Self::Backend { detail, .. } => {
                (!detail.is_empty()).then_some(detail.as_str())
            }
            _ => None,
        }
    }
}

/// Extracts the `detail` field from a FastAPI-style error body.
fn detail_from_body(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.detail)
        .filter(|d| !d.is_empty())
}
