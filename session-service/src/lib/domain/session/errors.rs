use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Top-level error for all session operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Credential errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredential,

    // Conflict errors
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    // Token errors
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    // Validation errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    // Internal errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Store error: {0}")]
    Store(String),
}

/// Coarse error classes used to decide what the boundary may reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    Credential,
    Conflict,
    Token,
    Validation,
    Internal,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::UserNotFound(_) | AuthError::InvalidCredential => AuthErrorKind::Credential,
            AuthError::AlreadyExists(_) => AuthErrorKind::Conflict,
            // A token that cannot be signed is our failure, not the caller's.
            AuthError::Token(TokenError::SigningFailed(_)) => AuthErrorKind::Internal,
            AuthError::Token(_) => AuthErrorKind::Token,
            AuthError::InvalidEmail(_) | AuthError::InvalidRole(_) => AuthErrorKind::Validation,
            AuthError::Password(_) | AuthError::Store(_) => AuthErrorKind::Internal,
        }
    }
}
