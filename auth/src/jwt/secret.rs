use std::fmt;
use std::sync::Arc;

use super::errors::SecretError;

/// Process-wide secret used to sign and verify session tokens.
///
/// Loaded once at startup and never mutated afterwards. Cloning shares the
/// same bytes. The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Arc<[u8]>);

impl SigningSecret {
    /// Wrap raw secret bytes.
    ///
    /// # Arguments
    /// * `secret` - Secret key material (32 bytes or more recommended for HS256)
    ///
    /// # Errors
    /// * `Empty` - The secret is empty or whitespace only
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SecretError> {
        let secret = secret.as_ref();

        if secret.iter().all(u8::is_ascii_whitespace) {
            return Err(SecretError::Empty);
        }

        Ok(Self(Arc::from(secret)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}
