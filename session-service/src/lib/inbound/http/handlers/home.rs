use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::session::guard::Principal;

pub async fn home(Extension(principal): Extension<Principal>) -> ApiSuccess<HomeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HomeResponseData {
            message: "Home page".to_string(),
            role: principal.role.as_str().to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeResponseData {
    pub message: String,
    pub role: String,
}
