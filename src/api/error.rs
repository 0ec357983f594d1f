//! Failure type for completion requests.

use std::error::Error;
use std::fmt;

use reqwest::StatusCode;

/// Single error surfaced for any failed completion attempt.
///
/// Transport failures, non-success HTTP statuses, and unusable response
/// bodies all collapse into one message so the UI can show it in place of
/// the assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build an error from a non-success HTTP response, pulling the
    /// human-readable summary out of the body when the server sent one.
    pub fn from_api_response(status: StatusCode, body: &str) -> Self {
        let summary = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| extract_error_summary(&value))
            .unwrap_or_else(|| collapse_whitespace(body));

        if summary.is_empty() {
            Self::new(format!("API error (HTTP {})", status.as_u16()))
        } else {
            Self::new(format!("API error (HTTP {}): {}", status.as_u16(), summary))
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("Request failed: {err}"))
    }
}

/// Probe the common shapes of OpenAI-compatible error bodies:
/// `{"error": {"message": ...}}`, `{"error": "..."}`, and `{"message": ...}`.
fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    if let Some(message) = value.pointer("/error/message").and_then(|v| v.as_str()) {
        return Some(collapse_whitespace(message));
    }

    match value.get("error") {
        Some(serde_json::Value::String(message)) => return Some(collapse_whitespace(message)),
        Some(serde_json::Value::Object(map)) => {
            if let Some(serde_json::Value::String(message)) = map.get("message") {
                return Some(collapse_whitespace(message));
            }
        }
        _ => {}
    }

    if let Some(serde_json::Value::String(message)) = value.get("message") {
        return Some(collapse_whitespace(message));
    }

    None
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_nested_error_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let err = GenerationError::from_api_response(StatusCode::UNAUTHORIZED, body);
        assert_eq!(
            err.message(),
            "API error (HTTP 401): Incorrect API key provided"
        );
    }

    #[test]
    fn extracts_string_error_field() {
        let body = r#"{"error": "model overloaded"}"#;
        let err = GenerationError::from_api_response(StatusCode::SERVICE_UNAVAILABLE, body);
        assert_eq!(err.message(), "API error (HTTP 503): model overloaded");
    }

    #[test]
    fn extracts_top_level_message_field() {
        let body = r#"{"message": "Not Found"}"#;
        let err = GenerationError::from_api_response(StatusCode::NOT_FOUND, body);
        assert_eq!(err.message(), "API error (HTTP 404): Not Found");
    }

    #[test]
    fn falls_back_to_collapsed_raw_body() {
        let body = "upstream\n   gateway\ttimeout";
        let err = GenerationError::from_api_response(StatusCode::BAD_GATEWAY, body);
        assert_eq!(err.message(), "API error (HTTP 502): upstream gateway timeout");
    }

    #[test]
    fn empty_body_yields_status_only() {
        let err = GenerationError::from_api_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.message(), "API error (HTTP 500)");
    }

    #[test]
    fn multiline_summaries_are_collapsed() {
        let body = r#"{"error": {"message": "rate limit\nreached for requests"}}"#;
        let err = GenerationError::from_api_response(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(
            err.message(),
            "API error (HTTP 429): rate limit reached for requests"
        );
    }
}
