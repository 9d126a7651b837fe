use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Claims carried inside a session token.
///
/// The role is copied from the user record at issuance and is trusted as-is
/// until the token expires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (authenticated user's email)
    pub sub: String,

    /// Role granted at issuance time
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl SessionClaims {
    /// Create claims issued at `now` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - User identity (email)
    /// * `role` - Role claim
    /// * `now` - Issuance instant
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `SigningFailed` - `now + ttl` is not a representable instant
    pub fn new(
        subject: impl ToString,
        role: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::SigningFailed(format!("token lifetime {} overflows the clock", ttl))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0).single().unwrap_or_default()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }

    /// Check if the claims are expired at the given instant.
    ///
    /// A token is valid strictly before its expiration timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
