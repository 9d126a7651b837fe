use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UNAUTHORIZED;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::CookieCarrier;
use crate::session::guard::AccessDenied;

/// Middleware that runs the access guard and adds the principal to request extensions
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let carrier = CookieCarrier::from_headers(req.headers(), &state.cookies);

    let principal = state.guard.authorize(&carrier).map_err(|e| {
        tracing::warn!(
            reason = %e,
            path = %req.uri().path(),
            "Access denied"
        );
        ApiError::from(e).into_response()
    })?;

    tracing::debug!(
        subject = %principal.subject,
        role = %principal.role,
        "Access granted"
    );

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

impl From<AccessDenied> for ApiError {
    fn from(_: AccessDenied) -> Self {
        // Every denial reason gets the same answer
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    }
}
