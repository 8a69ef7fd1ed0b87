//! # Error taxonomy for backend calls
//!
//! Every backend operation fails with one of four [`ApiError`] kinds. HTTP
//! statuses map onto them as follows:
//!
//! | Status | Kind |
//! |--------|------|
//! | 401, 403 | [`ApiError::Auth`] |
//! | 404 | [`ApiError::NotFound`] |
//! | other 4xx | [`ApiError::Validation`] |
//! | 5xx, transport failure, timeout, undecodable body | [`ApiError::Network`] |
//!
//! The message is the server's `message` field when the error body is JSON,
//! the raw body text otherwise, and the status reason phrase when the body is
//! empty.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Bad credentials or missing/expired token.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The server rejected the request contents.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Unknown id.
    #[error("not found: {0}")]
    NotFound(String),
    /// Transport failure, timeout, server fault or unreadable response.
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = error_message(status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            s if s.is_client_error() => ApiError::Validation(message),
            _ => ApiError::Network(message),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body.to_string(),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Network(format!("request timed out: {e}"))
        } else if e.is_decode() {
            ApiError::Network(format!("unreadable response: {e}"))
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
