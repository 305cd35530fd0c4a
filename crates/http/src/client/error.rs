//! Client error types

use serde_json::Value;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure: DNS, refused connection, timeout, broken body
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether this error happened before any HTTP status was received
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Status code of a server error, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server(err) => Some(err.status),
            _ => None,
        }
    }

    /// Whether the server rejected our credentials
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }
}

/// Non-success response carrying the server's message payload
#[derive(Debug, Clone, Error)]
#[error("Server error {status}: {message}")]
pub struct ServerError {
    pub status: u16,
    pub message: String,
    body: Value,
}

impl ServerError {
    /// Build from a status code and raw response body
    ///
    /// The message is taken from `detail`, then `message`, then the first
    /// field error (`{"email": ["..."]}`), then the raw body, then the
    /// canonical reason for the status.
    pub fn from_body(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let parsed: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        let message = string_field(&parsed, "detail")
            .or_else(|| string_field(&parsed, "message"))
            .or_else(|| first_field_error(&parsed))
            .map(str::to_string)
            .or_else(|| {
                let raw = String::from_utf8_lossy(body).trim().to_string();
                (!raw.is_empty()).then_some(raw)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Self {
            status: status.as_u16(),
            message,
            body: parsed,
        }
    }

    /// The `detail` message, if the server sent one
    pub fn detail(&self) -> Option<&str> {
        string_field(&self.body, "detail")
    }

    /// First validation message reported for `field`
    ///
    /// Accepts both `{"field": ["msg"]}` and `{"field": "msg"}`.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        match self.body.get(field)? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => items.first().and_then(Value::as_str),
            _ => None,
        }
    }
}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn first_field_error(body: &Value) -> Option<&str> {
    body.as_object()?.values().find_map(|value| match value {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.first().and_then(Value::as_str),
        _ => None,
    })
}
