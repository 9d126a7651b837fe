use thiserror::Error;

/// Error type for session token operations.
///
/// Parse failures stay distinct here even though the HTTP boundary reports
/// all of them as a single unauthorized outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

/// Error type for signing secret construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("Signing secret must not be empty")]
    Empty,
}
