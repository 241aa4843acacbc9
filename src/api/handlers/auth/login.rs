//! Password step of the two-step admin login.

use axum::{extract::Extension, Json};
use std::sync::Arc;
use tracing::info;

use super::types::{LoginRequest, LoginResponse};
use crate::auth::SessionManager;

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login attempt result; on success with needs_2fa the caller proceeds to token verification", body = LoginResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    manager: Extension<Arc<SessionManager>>,
    Json(request): Json<LoginRequest>,
) -> Json<LoginResponse> {
    let outcome = manager.login(&request.email, &request.password).await;
    if !outcome.success {
        info!("Rejected admin login attempt");
    }
    Json(LoginResponse::from(outcome))
}
