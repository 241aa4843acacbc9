//! Second-factor enrollment and verification endpoints.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use super::types::{EnableRequest, EnableResponse, SetupResponse, VerifyRequest, VerifyResponse};
use crate::auth::SessionManager;

#[utoipa::path(
    post,
    path = "/v1/auth/2fa/setup",
    responses(
        (status = 200, description = "Fresh secret and provisioning URI; nothing is persisted until enrollment is confirmed", body = SetupResponse),
        (status = 500, description = "Secret generation failed")
    ),
    tag = "2fa"
)]
pub async fn setup(manager: Extension<Arc<SessionManager>>) -> impl IntoResponse {
    match manager.generate_secret() {
        Ok(provisioned) => Json(SetupResponse {
            secret: provisioned.secret,
            uri: provisioned.uri,
        })
        .into_response(),
        Err(err) => {
            error!("Failed to generate second-factor secret: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/2fa/enable",
    request_body = EnableRequest,
    responses(
        (status = 200, description = "Enrollment result; on failure no state changed and the caller may retry", body = EnableResponse)
    ),
    tag = "2fa"
)]
pub async fn enable(
    manager: Extension<Arc<SessionManager>>,
    Json(request): Json<EnableRequest>,
) -> Json<EnableResponse> {
    let enabled = manager.enable_second_factor(&request.secret, &request.token);
    Json(EnableResponse { enabled })
}

#[utoipa::path(
    post,
    path = "/v1/auth/2fa/disable",
    responses(
        (status = 204, description = "Second factor disabled, secret cleared")
    ),
    tag = "2fa"
)]
pub async fn disable(manager: Extension<Arc<SessionManager>>) -> StatusCode {
    manager.disable_second_factor();
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    post,
    path = "/v1/auth/2fa/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification result; false covers invalid tokens and attempts that skipped the password step alike", body = VerifyResponse)
    ),
    tag = "2fa"
)]
pub async fn verify(
    manager: Extension<Arc<SessionManager>>,
    Json(request): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    let verified = manager.verify_token(&request.token);
    Json(VerifyResponse { verified })
}
