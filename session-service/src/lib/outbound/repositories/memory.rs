use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::session::errors::AuthError;
use crate::session::models::NewUser;
use crate::session::models::User;
use crate::session::models::UserId;
use crate::session::ports::SessionStore;

/// Process-local user store keyed by email.
///
/// Used when no database is configured and by the integration tests.
/// Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    last_id: i64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.inner.read().await.users.get(email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        // Check and insert under one write lock
        let mut inner = self.inner.write().await;

        if inner.users.contains_key(user.email.as_str()) {
            return Err(AuthError::AlreadyExists(user.email.to_string()));
        }

        inner.last_id += 1;
        let created = User {
            id: UserId(inner.last_id),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        inner
            .users
            .insert(created.email.as_str().to_string(), created.clone());

        Ok(created)
    }
}
