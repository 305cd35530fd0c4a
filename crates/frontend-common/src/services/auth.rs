//! Login, registration and logout

use crate::config::SessionConfig;
use crate::notify::{Notification, Notifier};
use crate::storage::{CredentialStore, StoreError};
use notes_http::types::{RegisterRequest, TokenObtainRequest, TokenPair};
use notes_http::{ClientError, NotesClient, ServerError, StatusCode};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub accept_terms: bool,
}

/// Form problems caught before anything is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Please accept the terms and conditions")]
    TermsNotAccepted,
}

/// Why a login or registration did not go through
#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Rejected(ServerError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LoginForm {
    /// Check the fields in display order; the first problem wins
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_credentials(&self.email, &self.password)
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_credentials(&self.email, &self.password)?;
        if !self.accept_terms {
            return Err(ValidationError::TermsNotAccepted);
        }
        Ok(())
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Account name derived from an email address: everything before the first `@`
pub fn username_from_email(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

/// Account flows that talk to the token and registration endpoints
pub struct AuthService {
    client: NotesClient,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    pub fn new(
        client: NotesClient,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            store,
            notifier,
        }
    }

    /// Log in and store the issued tokens
    ///
    /// Returns the route to show next. Every outcome is also reported
    /// through the notifier. Stored tokens are only touched on success.
    pub async fn login(&self, form: &LoginForm) -> Result<&'static str, AuthFlowError> {
        let result = self.try_login(form).await;
        match &result {
            Ok(_) => self.notifier.notify(Notification::success("Login successful!")),
            Err(AuthFlowError::Validation(e)) => self.notifier.notify(Notification::error(e.to_string())),
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.notifier
                    .notify(Notification::error(format!("Login failed: {}", failure_text(e))));
            }
        }
        result
    }

    async fn try_login(&self, form: &LoginForm) -> Result<&'static str, AuthFlowError> {
        form.validate()?;

        let request = TokenObtainRequest {
            username: username_from_email(&form.email).to_string(),
            password: form.password.clone(),
        };
        let response = self.client.obtain_token(&request).await?;
        if response.status() != StatusCode::OK {
            return Err(AuthFlowError::Rejected(response.server_error()));
        }

        let tokens: TokenPair = response.json()?;
        self.store.set(SessionConfig::ACCESS_KEY, &tokens.access)?;
        self.store.set(SessionConfig::REFRESH_KEY, &tokens.refresh)?;
        if form.remember_me {
            self.store.set(SessionConfig::REMEMBER_ME_KEY, "true")?;
        }

        info!(username = %request.username, "Logged in");
        Ok(SessionConfig::HOME_ROUTE)
    }

    /// Create an account
    ///
    /// On success the caller is sent to the login route; no tokens are stored.
    pub async fn register(&self, form: &RegisterForm) -> Result<&'static str, AuthFlowError> {
        let result = self.try_register(form).await;
        match &result {
            Ok(_) => self
                .notifier
                .notify(Notification::success("Registration successful!")),
            Err(AuthFlowError::Validation(e)) => self.notifier.notify(Notification::error(e.to_string())),
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.notifier
                    .notify(Notification::error(registration_failure_text(e)));
            }
        }
        result
    }

    async fn try_register(&self, form: &RegisterForm) -> Result<&'static str, AuthFlowError> {
        form.validate()?;

        let request = RegisterRequest {
            email: form.email.clone(),
            password: form.password.clone(),
            username: username_from_email(&form.email).to_string(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
        };
        let response = self.client.register(&request).await?;
        if !response.is_success() {
            return Err(AuthFlowError::Rejected(response.server_error()));
        }

        info!(username = %request.username, "Registered");
        Ok(SessionConfig::LOGIN_ROUTE)
    }

    /// Forget the session locally
    ///
    /// The backend has no revocation endpoint, so nothing is sent.
    pub fn logout(&self) -> Result<&'static str, StoreError> {
        for key in SessionConfig::ALL_KEYS {
            self.store.remove(key)?;
        }
        info!("Logged out");
        Ok(SessionConfig::LOGIN_ROUTE)
    }
}

fn failure_text(err: &AuthFlowError) -> String {
    match err {
        AuthFlowError::Rejected(server) => server.message.clone(),
        other => other.to_string(),
    }
}

fn registration_failure_text(err: &AuthFlowError) -> String {
    let text = match err {
        AuthFlowError::Rejected(server) => server
            .field_error("email")
            .or_else(|| server.detail())
            .map_or_else(|| server.message.clone(), str::to_string),
        other => other.to_string(),
    };
    if text.trim().is_empty() {
        "Registration failed".to_string()
    } else {
        text
    }
}
