//! Request/response types for auth endpoints.

use crate::auth::LoginOutcome;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub needs_2fa: bool,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            success: outcome.success,
            needs_2fa: outcome.needs_2fa,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub two_factor_enabled: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SetupResponse {
    /// Base32 secret for manual entry into an authenticator app.
    pub secret: String,
    /// otpauth provisioning URI, rendered as a QR code by the frontend.
    pub uri: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct EnableRequest {
    pub secret: String,
    pub token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct EnableResponse {
    pub enabled: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyResponse {
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn login_request_round_trips() -> Result<()> {
        let request = LoginRequest {
            email: "admin@example.com".to_string(),
            password: "correct-pass".to_string(),
        };
        let value = serde_json::to_value(&request)?;
        let email = value
            .get("email")
            .and_then(serde_json::Value::as_str)
            .context("missing email")?;
        assert_eq!(email, "admin@example.com");
        let decoded: LoginRequest = serde_json::from_value(value)?;
        assert_eq!(decoded.password, "correct-pass");
        Ok(())
    }

    #[test]
    fn login_response_keeps_the_needs_2fa_field_name() -> Result<()> {
        let response = LoginResponse {
            success: true,
            needs_2fa: true,
        };
        let value = serde_json::to_value(&response)?;
        assert_eq!(
            value.get("needs_2fa").and_then(serde_json::Value::as_bool),
            Some(true)
        );
        Ok(())
    }

    #[test]
    fn login_response_from_outcome() {
        let response = LoginResponse::from(LoginOutcome {
            success: true,
            needs_2fa: false,
        });
        assert!(response.success);
        assert!(!response.needs_2fa);
    }
}
