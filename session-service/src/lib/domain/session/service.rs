use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;
use auth::SessionClaims;

use crate::session::errors::AuthError;
use crate::session::models::NewUser;
use crate::session::models::RegisterCommand;
use crate::session::models::User;
use crate::session::ports::AuthServicePort;
use crate::session::ports::SessionCarrier;
use crate::session::ports::SessionStore;

/// Domain service implementation for session operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<S>
where
    S: SessionStore,
{
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
}

impl<S> AuthService<S>
where
    S: SessionStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `authenticator` - Shared hasher and token codec
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: SessionStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            // Same hashing cost as a wrong password
            self.authenticator.verify_unknown_account(password);
            return Err(AuthError::UserNotFound(email.to_string()));
        };

        let issued = self
            .authenticator
            .authenticate(
                password,
                &user.password_hash,
                user.email.as_str(),
                user.role.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredential,
                AuthenticationError::Token(err) => AuthError::Token(err),
            })?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            expires_at = %issued.expires_at,
            "Session issued"
        );

        Ok(issued)
    }

    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        if self
            .store
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::AlreadyExists(command.email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .store
            .create(NewUser {
                email: command.email,
                name: command.name,
                password_hash,
                role: command.role.unwrap_or_default(),
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }

    fn resolve_identity(&self, token: &str) -> Result<SessionClaims, AuthError> {
        Ok(self.authenticator.validate_token(token)?)
    }

    async fn profile(&self, email: &str) -> Result<User, AuthError> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))
    }

    fn logout(&self, carrier: &mut dyn SessionCarrier) {
        carrier.clear();
        tracing::debug!("Session cleared");
    }
}
