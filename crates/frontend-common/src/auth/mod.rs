//! Session authentication: token claims, refresh and the session guard

pub mod claims;
pub mod guard;
pub mod refresh;

pub use claims::{Clock, FixedClock, SystemClock, TokenClaims, TokenDecodeError};
pub use guard::{AuthorizationState, GuardOptions, GuardOutcome, SessionGuard};
pub use refresh::{RefreshError, refresh_access_token};
