//! Access token claims
//!
//! Tokens are decoded without checking the signature. The expiry is only
//! used to decide whether a refresh is worth attempting before a protected
//! view loads; the server still validates every token it receives.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Access token could not be read
#[derive(Debug, Error)]
#[error("Malformed access token: {0}")]
pub struct TokenDecodeError(#[from] jsonwebtoken::errors::Error);

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    /// Every other claim (`user_id`, `token_type`, `jti`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Decode the payload of `token` without verifying its signature
    pub fn decode_unverified(token: &str) -> Result<Self, TokenDecodeError> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        // `exp` is enforced by the struct itself
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Self>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }

    /// Whether the token is expired at `now` (seconds since the epoch)
    ///
    /// A token whose expiry equals the current second counts as expired.
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Expiry as a timestamp, if representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// The `user_id` claim rendered as text
    pub fn user_id(&self) -> Option<String> {
        match self.extra.get("user_id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Source of the current wall-clock time in whole seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock frozen at a given second
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
