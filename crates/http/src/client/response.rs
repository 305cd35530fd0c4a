//! Raw responses returned by the pipeline

use super::error::{ClientError, ServerError};
use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Status and body of a completed HTTP exchange
///
/// Every status, including 4xx and 5xx, arrives here; only network-level
/// failures are reported as errors by the client.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Bytes,
}

impl ApiResponse {
    pub const fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as UTF-8 text, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON regardless of status
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Build the server error for this response
    pub fn server_error(&self) -> ServerError {
        ServerError::from_body(self.status, &self.body)
    }

    /// Turn a non-success status into a [`ServerError`]
    pub fn error_for_status(self) -> Result<Self, ServerError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.server_error())
        }
    }
}
