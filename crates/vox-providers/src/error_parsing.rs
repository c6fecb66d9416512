//! Extract a human-readable message from provider error bodies.
//!
//! Each backend wraps failures differently: Deepgram uses `err_msg`,
//! OpenAI and Gemini nest `error.message`, some responses carry a flat
//! `message` or `description`. When nothing structured is found the caller
//! gets a generic "status + reason" line — errors are never silently
//! swallowed at this layer.

use reqwest::StatusCode;
use serde_json::Value;

/// Parsed provider error details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorInfo {
    /// Human-readable message, verbatim from the body when structured.
    pub message: String,
    /// Provider error code, when one was present.
    pub code: Option<String>,
}

/// Parse a non-2xx body into an [`ApiErrorInfo`].
#[must_use]
pub fn parse_api_error(body: &str, status: StatusCode) -> ApiErrorInfo {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let message = json
            .get("err_msg")
            .and_then(Value::as_str)
            .or_else(|| json.pointer("/error/message").and_then(Value::as_str))
            .or_else(|| json.get("message").and_then(Value::as_str))
            .or_else(|| json.get("description").and_then(Value::as_str));

        if let Some(message) = message {
            let code = json
                .get("err_code")
                .and_then(Value::as_str)
                .or_else(|| json.pointer("/error/code").and_then(Value::as_str))
                .or_else(|| json.pointer("/error/status").and_then(Value::as_str))
                .map(str::to_string);
            return ApiErrorInfo {
                message: message.to_string(),
                code,
            };
        }
    }

    ApiErrorInfo {
        message: format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
        code: None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
