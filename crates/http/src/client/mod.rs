//! Notes API client

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod notes;
pub mod response;

pub use response::ApiResponse;

use error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Source of the access token attached to outgoing requests
///
/// Consulted once per request, right before dispatch, so a token written
/// by a concurrent login or refresh is picked up by the next call.
pub trait TokenSource: Send + Sync {
    /// Current access token, `None` when unauthenticated
    fn access_token(&self) -> Option<String>;
}

/// Fixed token, mostly useful for scripts and tests
impl TokenSource for String {
    fn access_token(&self) -> Option<String> {
        Some(self.clone())
    }
}

/// Notes API client
#[derive(Clone)]
pub struct NotesClient {
    client: Client,
    base_url: String,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl fmt::Debug for NotesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotesClient")
            .field("base_url", &self.base_url)
            .field("has_token_source", &self.tokens.is_some())
            .finish_non_exhaustive()
    }
}

impl NotesClient {
    /// Create a new unauthenticated client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> NotesClientBuilder {
        NotesClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder, attaching the bearer token when one is stored
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), url);

        let token = self.tokens.as_ref().and_then(|source| source.access_token());
        debug!(%method, path, authenticated = token.is_some(), "preparing request");

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Dispatch a request and collect the full response
    ///
    /// Resolves on any HTTP status. Only failures below HTTP (connection,
    /// DNS, timeout, body read) become [`ClientError::Transport`].
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse, ClientError> {
        let response = request.send().await.map_err(|e| {
            debug!(error = %e, "transport failure");
            ClientError::Transport(e)
        })?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(ApiResponse::new(status, body))
    }

    /// Dispatch a request, requiring a success status and a JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?.error_for_status()?;
        response.json()
    }
}

/// Builder for [`NotesClient`]
#[derive(Default)]
pub struct NotesClientBuilder {
    base_url: Option<String>,
    tokens: Option<Arc<dyn TokenSource>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NotesClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set where access tokens are read from
    #[must_use]
    pub fn token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<NotesClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url '{base_url}': {e}")))?;

        let base_url = endpoint::normalize(&base_url);

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("notes-client/", env!("CARGO_PKG_VERSION")).to_string()),
        );

        let client = client_builder.build()?;

        Ok(NotesClient {
            client,
            base_url,
            tokens: self.tokens,
        })
    }
}
