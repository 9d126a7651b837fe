use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::errors::AuthError;
use crate::session::guard::Principal;
use crate::session::models::User;

pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    state
        .auth_service
        .profile(&principal.subject)
        .await
        .map_err(|e| match e {
            // Valid token for a user that has since been removed
            AuthError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            _ => ApiError::from(e),
        })
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for MeResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
        }
    }
}
