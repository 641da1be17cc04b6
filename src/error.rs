//! Error types for talking to the OwlTune backend.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Request never produced a response (unreachable, timeout, broken body)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Success response that could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Configured backend URL is unusable
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build a `Status` error from a non-2xx response body.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: extract_error_message(status, body),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Pull the human readable message out of an error body.
///
/// Looks at `error`, then `message`, then falls back to the status reason.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.error.or(parsed.message).filter(|m| !m.trim().is_empty()) {
            return msg;
        }
    }

    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("HTTP error! status: {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field() {
        let msg = extract_error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "Failed to retrieve playlist details", "message": "ignored"}"#,
        );
        assert_eq!(msg, "Failed to retrieve playlist details");
    }

    #[test]
    fn falls_back_to_message_field() {
        let msg = extract_error_message(
            StatusCode::BAD_REQUEST,
            r#"{"success": false, "message": "No playlists provided"}"#,
        );
        assert_eq!(msg, "No playlists provided");
    }

    #[test]
    fn falls_back_to_status_text() {
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            "Bad Gateway"
        );
        assert_eq!(
            extract_error_message(StatusCode::NOT_FOUND, r#"{"error": "   "}"#),
            "Not Found"
        );
    }

    #[test]
    fn unknown_status_uses_code() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(extract_error_message(status, ""), "HTTP error! status: 599");
    }
}
