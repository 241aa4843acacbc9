//! Remote key-value configuration lookup.
//!
//! The portal keeps admin credentials and page copy in a hosted key-value
//! config service. Lookups must tolerate the service being absent (local
//! development, network failure): every failure path resolves to `None` and
//! is only logged, the caller falls back to built-in values.

use crate::auth::credentials::RemoteCredentials;
use anyhow::Result;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

const ADMIN_EMAIL_KEY: &str = "admin_email";
const ADMIN_PASSWORD_KEY: &str = "admin_password";

/// Client for the remote config service. With no base URL configured every
/// lookup resolves to `None`, which is the expected local-development mode.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    client: Client,
    base_url: Option<Url>,
    token: Option<SecretString>,
}

impl RemoteConfig {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Option<Url>, token: Option<SecretString>) -> Result<Self> {
        let client = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Fetch a single string value. Absence, unavailability, and malformed
    /// responses all map to `None`.
    pub async fn get(&self, key: &str) -> Option<String> {
        let Some(base_url) = &self.base_url else {
            debug!("Remote config not configured, skipping lookup of {key}");
            return None;
        };

        let base = base_url.as_str().trim_end_matches('/');
        let url = match Url::parse(&format!("{base}/item/{key}")) {
            Ok(url) => url,
            Err(err) => {
                warn!("Invalid remote config URL for key {key}: {err}");
                return None;
            }
        };

        let span = info_span!(
            "remote_config.get",
            http.method = "GET",
            url = %url,
            key
        );
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = match request.send().instrument(span).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Remote config unreachable, using fallback for {key}: {err}");
                return None;
            }
        };

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("Remote config has no value for {key}");
                None
            }
            status if status.is_success() => match response.json::<Value>().await {
                Ok(Value::String(value)) => Some(value),
                Ok(other) => {
                    warn!("Remote config value for {key} is not a string: {other}");
                    None
                }
                Err(err) => {
                    warn!("Remote config returned malformed body for {key}: {err}");
                    None
                }
            },
            status => {
                warn!("Remote config lookup for {key} failed: {status}");
                None
            }
        }
    }

    /// Fetch both admin credential keys concurrently. The lookups are
    /// independent; either may individually come back empty.
    pub async fn admin_credentials(&self) -> RemoteCredentials {
        let (email, password) =
            tokio::join!(self.get(ADMIN_EMAIL_KEY), self.get(ADMIN_PASSWORD_KEY));
        RemoteCredentials { email, password }
    }
}
