use async_trait::async_trait;
use auth::IssuedToken;
use auth::SessionClaims;
use chrono::Duration;

use crate::session::errors::AuthError;
use crate::session::models::NewUser;
use crate::session::models::RegisterCommand;
use crate::session::models::User;

/// Port for session domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Authenticate by email and password and issue a session token.
    ///
    /// # Arguments
    /// * `email` - Email address, matched exactly
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Signed session token and its expiry
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `InvalidCredential` - Password does not match
    /// * `Token` - Token signing failed
    /// * `Store` - Store lookup failed
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email, display name, password and optional role
    ///
    /// # Returns
    /// Created user record
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `Store` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `Token` - Token is malformed, forged or expired
    fn resolve_identity(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Fetch the user record behind an authenticated subject.
    ///
    /// # Errors
    /// * `UserNotFound` - The user no longer exists
    /// * `Store` - Store lookup failed
    async fn profile(&self, email: &str) -> Result<User, AuthError>;

    /// End the session held by the client.
    ///
    /// There is no server-side session table: the carrier is told to drop
    /// the token, which otherwise stays valid until it expires.
    fn logout(&self, carrier: &mut dyn SessionCarrier);
}

/// Persistence operations for user records.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Retrieve user by exact email match.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Persist a new user record.
    ///
    /// Must be atomic with respect to email uniqueness: a concurrent
    /// duplicate fails here even if an earlier lookup saw no record.
    ///
    /// # Returns
    /// Created user record with its assigned identifier
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Store` - Store operation failed
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;
}

/// Transport slot holding the session token for one request/response cycle.
///
/// Implementations decide whether the token travels in a cookie, a header or
/// elsewhere.
pub trait SessionCarrier {
    /// Token presented by the client, if any.
    fn get(&self) -> Option<&str>;

    /// Hand a token to the client for the given lifetime.
    fn set(&mut self, token: &str, max_age: Duration);

    /// Instruct the client to discard its token.
    fn clear(&mut self);
}
