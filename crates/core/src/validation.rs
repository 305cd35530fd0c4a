//! Settings validation
//!
//! Settings structs implement [`ValidateConfig`] and call it right after
//! deserialization, so a bad value fails at startup with the offending key
//! in the message instead of surfacing later as a request error.

use config::ConfigError;
use serde::{Deserialize, Serialize};

/// Post-deserialization checks for a settings struct
pub trait ValidateConfig: Serialize + for<'de> Deserialize<'de> {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Field checks returning a `ConfigError` that names the field
pub mod validators {
    use config::ConfigError;
    use std::fmt::Display;

    fn invalid(field: &str, reason: impl Display) -> ConfigError {
        ConfigError::Message(format!("{field}: {reason}"))
    }

    /// Absolute `http` or `https` URL
    pub fn validate_url(value: &str, field: &str) -> Result<(), ConfigError> {
        let url = url::Url::parse(value).map_err(|e| invalid(field, format!("invalid URL - {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                field,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(())
    }

    /// `min <= value <= max`
    #[allow(clippy::manual_range_contains)]
    pub fn validate_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ConfigError>
    where
        T: PartialOrd + Display,
    {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(invalid(
                field,
                format!("must be between {min} and {max}, got {value}"),
            ))
        }
    }
}
