//! Client-side session handling for the notes application
//!
//! Front ends build an [`AppContext`] around a [`CredentialStore`] and a
//! [`Notifier`], run a [`SessionGuard`] before any protected view, and use
//! the services for login, registration and note management.

pub mod auth;
pub mod config;
pub mod context;
pub mod notify;
pub mod services;
pub mod storage;

pub use auth::{
    AuthorizationState, Clock, FixedClock, GuardOptions, GuardOutcome, RefreshError,
    SessionGuard, SystemClock, TokenClaims, TokenDecodeError,
};
pub use config::SessionConfig;
pub use context::AppContext;
pub use notify::{Notification, NotificationLevel, NotificationLog, Notifier};
pub use services::{
    AuthFlowError, AuthService, LoginForm, NotesPage, RegisterForm, ValidationError,
};
pub use storage::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError, StoredAccessToken,
};
