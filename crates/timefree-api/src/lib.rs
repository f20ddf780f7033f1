//! HTTP client for the time-freedom analysis backend.
//!
//! The backend performs all calendar parsing, scoring and text generation;
//! this crate only speaks its `/api` surface: credential exchange, calendar
//! authorization, and the two analysis endpoints.

pub mod client;
pub mod error;
pub mod types;

pub use client::BackendClient;
pub use error::{ApiError, ApiResult};
pub use types::{AuthorizationUrlResponse, LoginRequest, LoginResponse, ManualAnalysisRequest};
