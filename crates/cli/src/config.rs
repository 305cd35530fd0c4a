//! CLI settings
//!
//! Layered from built-in defaults, an optional TOML file and `NOTES__*`
//! environment variables (`NOTES__API__TIMEOUT_SECS=10`), later sources
//! winning. The default base URL itself honours `NOTES_API_URL`.

use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment, File};
use notes_core::ValidateConfig;
use notes_core::validation::validators::{validate_range, validate_url};
use notes_frontend_common::GuardOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base endpoint of the notes API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Session guard settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Try the refresh token when no access token is stored
    pub refresh_when_access_missing: bool,
    /// Share one refresh between concurrent guard activations
    pub coalesce_refresh: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: notes_http::resolve_base_url(),
            timeout_secs: 30,
        }
    }
}

impl From<&SessionSettings> for GuardOptions {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            refresh_when_access_missing: settings.refresh_when_access_missing,
            coalesce_refresh: settings.coalesce_refresh,
        }
    }
}

impl Settings {
    /// Load settings
    ///
    /// `explicit` must exist when given; `fallback` is read only if present.
    pub fn load(explicit: Option<&Path>, fallback: &Path) -> Result<Self> {
        let defaults = Self::default();

        let file = match explicit {
            Some(path) => File::from(path).required(true),
            None => File::from(fallback).required(false),
        };

        let settings = Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default(
                "session.refresh_when_access_missing",
                defaults.session.refresh_when_access_missing,
            )?
            .set_default("session.coalesce_refresh", defaults.session.coalesce_refresh)?
            .add_source(file)
            .add_source(Environment::with_prefix("NOTES").separator("__"))
            .build()
            .context("Failed to read settings")?;

        let settings: Self = settings
            .try_deserialize()
            .context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }
}

impl ValidateConfig for Settings {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.api.base_url, "api.base_url")?;
        validate_range(self.api.timeout_secs, 1, 300, "api.timeout_secs")?;
        Ok(())
    }
}
