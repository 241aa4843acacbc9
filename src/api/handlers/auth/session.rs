//! Session status and logout endpoints.

use axum::{extract::Extension, http::StatusCode, Json};
use std::sync::Arc;

use super::types::SessionResponse;
use crate::auth::SessionManager;

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Current session state, consumed by the frontend route guard", body = SessionResponse)
    ),
    tag = "auth"
)]
pub async fn session(manager: Extension<Arc<SessionManager>>) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: manager.is_authenticated(),
        two_factor_enabled: manager.second_factor_enabled(),
    })
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Session and any pending login attempt cleared")
    ),
    tag = "auth"
)]
pub async fn logout(manager: Extension<Arc<SessionManager>>) -> StatusCode {
    // Also the cancel path while a second-factor verification is pending.
    manager.logout();
    StatusCode::NO_CONTENT
}
