//! Shared wiring for a front end

use crate::auth::{GuardOptions, SessionGuard};
use crate::notify::Notifier;
use crate::services::{AuthService, NotesPage};
use crate::storage::{CredentialStore, StoredAccessToken};
use notes_http::{ClientError, NotesClient, NotesClientBuilder};
use std::sync::Arc;

/// The HTTP client, credential store and notifier a front end runs with
///
/// The client reads its bearer token from the same store the guard and the
/// login flow write to.
#[derive(Clone)]
pub struct AppContext {
    client: NotesClient,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Build a context against `base_url` with default client settings
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        Self::from_builder(NotesClient::builder().base_url(base_url), store, notifier)
    }

    /// Build a context from a partially configured client builder
    pub fn from_builder(
        builder: NotesClientBuilder,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let client = builder
            .token_source(Arc::new(StoredAccessToken::new(store.clone())))
            .build()?;
        Ok(Self {
            client,
            store,
            notifier,
        })
    }

    pub fn client(&self) -> &NotesClient {
        &self.client
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn guard(&self, options: GuardOptions) -> SessionGuard {
        SessionGuard::new(self.client.clone(), self.store.clone()).with_options(options)
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone(), self.store.clone(), self.notifier.clone())
    }

    pub fn notes_page(&self) -> NotesPage {
        NotesPage::new(self.client.clone(), self.notifier.clone())
    }
}
