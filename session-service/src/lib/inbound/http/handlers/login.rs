use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::CookieCarrier;
use crate::session::ports::SessionCarrier;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<(HeaderMap, ApiSuccess<LoginResponseData>), ApiError> {
    let issued = state
        .auth_service
        .login(&body.email, &body.password)
        .await?;

    let mut carrier = CookieCarrier::new(&state.cookies);
    carrier.set(&issued.token, issued.expires_at - Utc::now());

    Ok((
        carrier.into_headers(),
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                message: "User logged in".to_string(),
                expires_at: issued.expires_at,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}
