//! One-shot access token refresh

use crate::config::SessionConfig;
use crate::storage::{CredentialStore, StoreError};
use notes_http::types::{TokenRefreshRequest, TokenRefreshResponse};
use notes_http::{ClientError, NotesClient, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

/// Why a refresh did not produce a new access token
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("No refresh token stored")]
    MissingRefreshToken,

    #[error("Refresh rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Refresh request failed: {0}")]
    Client(#[from] ClientError),

    #[error("Could not store refreshed token: {0}")]
    Store(#[from] StoreError),
}

/// Exchange the stored refresh token for a new access token
///
/// Only status 200 counts as success; the new access token then replaces
/// the stored one. On any failure the store is left untouched. There is no
/// retry and the refresh token itself is never rotated.
pub async fn refresh_access_token(
    client: &NotesClient,
    store: &dyn CredentialStore,
) -> Result<(), RefreshError> {
    let refresh = store
        .get(SessionConfig::REFRESH_KEY)
        .ok_or(RefreshError::MissingRefreshToken)?;

    debug!("Requesting new access token");
    let response = client
        .refresh_token(&TokenRefreshRequest { refresh })
        .await?;

    if response.status() != StatusCode::OK {
        let err = response.server_error();
        return Err(RefreshError::Rejected {
            status: err.status,
            message: err.message,
        });
    }

    let body: TokenRefreshResponse = response.json()?;
    store.set(SessionConfig::ACCESS_KEY, &body.access)?;
    info!("Access token refreshed");
    Ok(())
}
