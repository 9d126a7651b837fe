use chrono::Duration;

use crate::jwt::IssuedToken;
use crate::jwt::SessionClaims;
use crate::jwt::SigningSecret;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Well-formed Argon2id hash (default parameters) that no password matches.
///
/// Verified against when a login names an unknown account, so that path costs
/// the same as a wrong password.
const ABSENT_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$37LWabtIIBC3qaSgNbs7IQ$3IvGZ84E4U7F6qPolOKdFI5rf7WoOFuCxnQBzGRIFAU";

/// Authentication coordinator combining password verification and session
/// token handling.
///
/// Built once from the process-wide signing secret and shared by every
/// component that issues or validates tokens.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    session_ttl: Duration,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing and verification
    /// * `session_ttl` - Lifetime of every issued session token
    pub fn new(secret: &SigningSecret, session_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
            session_ttl,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to put in the token
    /// * `role` - Role claim to put in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the stored hash is unreadable)
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        role: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(subject, role, self.session_ttl)?)
    }

    /// Spend the cost of a password verification for an account that does
    /// not exist, so the response time does not reveal whether it exists.
    ///
    /// Always returns `false`.
    pub fn verify_unknown_account(&self, password: &str) -> bool {
        self.password_hasher.verify(password, ABSENT_ACCOUNT_HASH)
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.token_codec.parse(token)
    }
}
