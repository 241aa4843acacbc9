//! `OpenAPI` document served to the Swagger UI and the frontend tooling.

use crate::api::handlers;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::auth::login::login,
        handlers::auth::session::session,
        handlers::auth::session::logout,
        handlers::auth::twofactor::setup,
        handlers::auth::twofactor::enable,
        handlers::auth::twofactor::disable,
        handlers::auth::twofactor::verify,
    ),
    components(schemas(
        handlers::auth::types::LoginRequest,
        handlers::auth::types::LoginResponse,
        handlers::auth::types::SessionResponse,
        handlers::auth::types::SetupResponse,
        handlers::auth::types::EnableRequest,
        handlers::auth::types::EnableResponse,
        handlers::auth::types::VerifyRequest,
        handlers::auth::types::VerifyResponse,
    )),
    tags(
        (name = "auth", description = "Admin session endpoints"),
        (name = "2fa", description = "Second-factor enrollment and verification"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
