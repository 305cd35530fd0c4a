//! Persisted credential storage
//!
//! A flat string-keyed store holding the access token, the refresh token
//! and the "remember me" flag. Values are opaque bearer credentials: they
//! are neither encrypted nor expired by the store.

mod file;
mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use crate::config::SessionConfig;
use notes_http::TokenSource;
use std::sync::Arc;
use thiserror::Error;

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Synchronous key-value store for session credentials
pub trait CredentialStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a single value; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Delete every value
    fn clear(&self) -> Result<(), StoreError>;
}

/// Reads the access token out of a [`CredentialStore`] for the HTTP client
#[derive(Clone)]
pub struct StoredAccessToken(Arc<dyn CredentialStore>);

impl StoredAccessToken {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self(store)
    }
}

impl TokenSource for StoredAccessToken {
    fn access_token(&self) -> Option<String> {
        self.0.get(SessionConfig::ACCESS_KEY)
    }
}
