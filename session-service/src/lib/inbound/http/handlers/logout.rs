use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::CookieCarrier;

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (HeaderMap, ApiSuccess<LogoutResponseData>) {
    let mut carrier = CookieCarrier::from_headers(&headers, &state.cookies);
    state.auth_service.logout(&mut carrier);

    (
        carrier.into_headers(),
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "User logged out".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
