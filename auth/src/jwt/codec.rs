use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;
use super::secret::SigningSecret;

/// A freshly signed session token together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Session token codec.
///
/// Signs and verifies compact HS256 tokens. Both keys are derived from the
/// same [`SigningSecret`] in [`TokenCodec::new`], so the issuing and the
/// verifying path cannot disagree on the secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new codec bound to a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `subject` carrying `role`, valid for `ttl`.
    ///
    /// # Errors
    /// * `SigningFailed` - The signing primitive failed or `ttl` overflows the clock
    pub fn issue(&self, subject: &str, role: &str, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let claims = SessionClaims::new(subject, role, Utc::now(), ttl)?;
        let token = self.encode(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Sign an arbitrary set of session claims.
    ///
    /// # Errors
    /// * `SigningFailed` - The signing primitive failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - MAC mismatch (tampered token or different secret)
    /// * `Expired` - The token is at or past its expiration
    /// * `Malformed` - The token cannot be decoded
    pub fn parse(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        // The library accepts `exp == now`; a session ends at its expiry.
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
