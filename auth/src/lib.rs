//! Session authentication primitives
//!
//! Provides the security-sensitive building blocks of the session service:
//! - Password hashing (Argon2id)
//! - Signed, expiring session tokens (HS256)
//! - Authentication coordination
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SigningSecret, TokenCodec};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let codec = TokenCodec::new(&secret);
//! let issued = codec.issue("alice@example.com", "user", Duration::minutes(5)).unwrap();
//! let claims = codec.parse(&issued.token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningSecret};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret, Duration::minutes(5));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let issued = auth.authenticate("password123", &hash, "alice@example.com", "user").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.role, "user");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::IssuedToken;
pub use jwt::SecretError;
pub use jwt::SessionClaims;
pub use jwt::SigningSecret;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
