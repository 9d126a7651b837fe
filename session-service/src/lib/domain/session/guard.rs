use std::sync::Arc;

use auth::Authenticator;
use auth::TokenError;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::session::models::Role;
use crate::session::ports::SessionCarrier;

/// Identity established for a request that passed the access guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

/// Reason a request was turned away by the access guard.
///
/// The variants are for logs only. Callers are expected to answer every
/// variant with the same unauthorized response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("No session token presented")]
    MissingToken,

    #[error("Session token rejected: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Role not allowed: {0}")]
    RoleNotAllowed(String),
}

/// Request-level check that a session token is present, valid and carries
/// one of the allowed roles.
///
/// Stateless between requests: every call re-validates the token.
pub struct AccessGuard {
    authenticator: Arc<Authenticator>,
    allowed: Vec<Role>,
}

impl AccessGuard {
    pub fn new(authenticator: Arc<Authenticator>, allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            authenticator,
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Run the checks in order: token present, token valid, role allowed.
    ///
    /// # Errors
    /// * `MissingToken` - The carrier holds no token
    /// * `InvalidToken` - Signature, format or expiry check failed
    /// * `RoleNotAllowed` - The role claim is unknown or not in the allowed set
    pub fn authorize<C>(&self, carrier: &C) -> Result<Principal, AccessDenied>
    where
        C: SessionCarrier + ?Sized,
    {
        let token = carrier.get().ok_or(AccessDenied::MissingToken)?;

        let claims = self.authenticator.validate_token(token)?;

        let role = claims
            .role
            .parse::<Role>()
            .ok()
            .filter(|role| self.allowed.contains(role))
            .ok_or_else(|| AccessDenied::RoleNotAllowed(claims.role.clone()))?;

        Ok(Principal {
            expires_at: claims.expires_at(),
            subject: claims.sub,
            role,
        })
    }
}
