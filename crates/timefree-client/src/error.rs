//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Backend API error.
    Api(String),
    /// IO error.
    Io(std::io::Error),
    /// Bad or missing user input.
    Input(String),
    /// Session storage error.
    Storage(String),
    /// OAuth callback listener error.
    Callback(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Api(msg) => write!(f, "backend error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Input(msg) => write!(f, "{}", msg),
            Self::Storage(msg) => write!(f, "storage error: {}", msg),
            Self::Callback(msg) => write!(f, "callback error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<timefree_api::ApiError> for ClientError {
    fn from(err: timefree_api::ApiError) -> Self {
        Self::Api(err.to_string())
    }
}
