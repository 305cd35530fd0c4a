//! Session guard for protected views
//!
//! Every activation starts in [`AuthorizationState::Unknown`] and settles
//! on `Authorized` or `Unauthorized`:
//!
//! 1. no stored access token: Unauthorized
//! 2. token does not decode: Unauthorized
//! 3. `exp` in the future: Authorized
//! 4. otherwise one refresh attempt decides
//!
//! The decoded expiry only saves a round trip. It is not an authorization
//! check; the server still validates every request.

use super::claims::{Clock, SystemClock, TokenClaims};
use super::refresh::refresh_access_token;
use crate::config::SessionConfig;
use crate::storage::CredentialStore;
use notes_http::NotesClient;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Authorization state of one guard activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationState {
    /// Evaluation in progress; show a pending indicator, not the view
    Unknown,
    Authorized,
    Unauthorized,
}

impl AuthorizationState {
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Result of running a view behind the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    /// The view ran and produced `T`
    Admitted(T),
    /// The view was not run; navigate to this route instead
    Redirect(&'static str),
}

/// Guard behaviour switches
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardOptions {
    /// Attempt a refresh when no access token is stored at all, instead of
    /// failing straight away
    pub refresh_when_access_missing: bool,
    /// Let concurrent activations share one in-flight refresh
    pub coalesce_refresh: bool,
}

/// Admission check in front of protected views
pub struct SessionGuard {
    client: NotesClient,
    store: Arc<dyn CredentialStore>,
    clock: Arc<dyn Clock>,
    options: GuardOptions,
    state: watch::Sender<AuthorizationState>,
    refresh_lock: Mutex<()>,
}

impl SessionGuard {
    pub fn new(client: NotesClient, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(AuthorizationState::Unknown);
        Self {
            client,
            store,
            clock: Arc::new(SystemClock),
            options: GuardOptions::default(),
            state,
            refresh_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: GuardOptions) -> Self {
        self.options = options;
        self
    }

    /// Observe state changes, including the initial `Unknown`
    pub fn subscribe(&self) -> watch::Receiver<AuthorizationState> {
        self.state.subscribe()
    }

    /// State of the most recent activation
    pub fn state(&self) -> AuthorizationState {
        *self.state.borrow()
    }

    /// Run one activation and return its settled state
    pub async fn evaluate(&self) -> AuthorizationState {
        self.state.send_replace(AuthorizationState::Unknown);
        let settled = self.decide().await;
        self.state.send_replace(settled);
        info!(state = ?settled, "Session guard settled");
        settled
    }

    /// Run `view` if the session is authorized, otherwise ask for a redirect
    ///
    /// The view is run once per call with no re-check while it executes.
    pub async fn protect<F, Fut, T>(&self, view: F) -> GuardOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.evaluate().await {
            AuthorizationState::Authorized => GuardOutcome::Admitted(view().await),
            AuthorizationState::Unauthorized | AuthorizationState::Unknown => {
                GuardOutcome::Redirect(SessionConfig::LOGIN_ROUTE)
            }
        }
    }

    async fn decide(&self) -> AuthorizationState {
        let Some(access) = self.store.get(SessionConfig::ACCESS_KEY) else {
            if self.options.refresh_when_access_missing {
                debug!("No access token stored, trying refresh token");
                return self.refresh(None).await;
            }
            debug!("No access token stored");
            return AuthorizationState::Unauthorized;
        };

        let claims = match TokenClaims::decode_unverified(&access) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Stored access token is unreadable");
                return AuthorizationState::Unauthorized;
            }
        };

        if !claims.is_expired_at(self.clock.now()) {
            return AuthorizationState::Authorized;
        }

        debug!(exp = claims.exp, "Access token expired");
        self.refresh(Some(&access)).await
    }

    async fn refresh(&self, stale_access: Option<&str>) -> AuthorizationState {
        if !self.options.coalesce_refresh {
            return self.refresh_once().await;
        }

        let _in_flight = self.refresh_lock.lock().await;

        // Someone else may have refreshed while we waited for the lock
        if let Some(current) = self.store.get(SessionConfig::ACCESS_KEY)
            && stale_access != Some(current.as_str())
            && self.is_fresh(&current)
        {
            debug!("Access token already refreshed by a concurrent activation");
            return AuthorizationState::Authorized;
        }

        self.refresh_once().await
    }

    async fn refresh_once(&self) -> AuthorizationState {
        match refresh_access_token(&self.client, self.store.as_ref()).await {
            Ok(()) => AuthorizationState::Authorized,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                AuthorizationState::Unauthorized
            }
        }
    }

    fn is_fresh(&self, access: &str) -> bool {
        TokenClaims::decode_unverified(access)
            .is_ok_and(|claims| !claims.is_expired_at(self.clock.now()))
    }
}
