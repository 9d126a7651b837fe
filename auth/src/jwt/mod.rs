pub mod claims;
pub mod codec;
pub mod errors;
pub mod secret;

pub use claims::SessionClaims;
pub use codec::IssuedToken;
pub use codec::TokenCodec;
pub use errors::SecretError;
pub use errors::TokenError;
pub use secret::SigningSecret;
