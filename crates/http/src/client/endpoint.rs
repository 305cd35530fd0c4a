//! Base endpoint resolution

/// Environment variable that overrides the API base URL
pub const API_URL_ENV: &str = "NOTES_API_URL";

/// Endpoint used when no override is configured
pub const DEFAULT_BASE_URL: &str = "https://68bfba3a-628b-4a7e-8eb7-36b81c44d634-dev.e1-us-east-azure.choreoapis.dev/notesmakingapp/server/v1/";

/// Resolve the base URL from the environment, falling back to the default
///
/// An empty override counts as unset.
pub fn resolve_base_url() -> String {
    base_url_or_default(std::env::var(API_URL_ENV).ok())
}

pub(crate) fn base_url_or_default(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Strip trailing slashes so that `base + "/api/..."` never doubles them
pub(crate) fn normalize(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
