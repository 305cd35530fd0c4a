//! Frontend configuration

/// Session configuration
pub struct SessionConfig;

impl SessionConfig {
    /// Storage key for the access token
    pub const ACCESS_KEY: &'static str = "access";

    /// Storage key for the refresh token
    pub const REFRESH_KEY: &'static str = "refresh";

    /// Storage key for the "remember me" flag
    pub const REMEMBER_ME_KEY: &'static str = "rememberMe";

    /// Every key the session writes, in the order they are cleared
    pub const ALL_KEYS: [&'static str; 3] =
        [Self::ACCESS_KEY, Self::REFRESH_KEY, Self::REMEMBER_ME_KEY];

    /// Where unauthorized visitors are sent
    pub const LOGIN_ROUTE: &'static str = "/login";

    /// Landing page after a successful login
    pub const HOME_ROUTE: &'static str = "/";
}
