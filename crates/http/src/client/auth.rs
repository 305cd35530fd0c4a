//! Authentication API client methods
//!
//! These return the raw [`ApiResponse`]; the session layer decides which
//! statuses count as success.

use super::{ApiResponse, ClientError, NotesClient};
use crate::types::{RegisterRequest, TokenObtainRequest, TokenRefreshRequest};
use reqwest::Method;

pub const TOKEN_PATH: &str = "/api/token/";
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";
pub const REGISTER_PATH: &str = "/api/user/register/";

impl NotesClient {
    /// Exchange credentials for an access/refresh token pair
    pub async fn obtain_token(
        &self,
        request: &TokenObtainRequest,
    ) -> Result<ApiResponse, ClientError> {
        let req = self.request(Method::POST, TOKEN_PATH).json(request);
        self.send(req).await
    }

    /// Trade a refresh token for a new access token
    pub async fn refresh_token(
        &self,
        request: &TokenRefreshRequest,
    ) -> Result<ApiResponse, ClientError> {
        let req = self.request(Method::POST, TOKEN_REFRESH_PATH).json(request);
        self.send(req).await
    }

    /// Create a new user account
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse, ClientError> {
        let req = self.request(Method::POST, REGISTER_PATH).json(request);
        self.send(req).await
    }
}
