//! TOTP scheme used for the second factor.
//!
//! Fixed parameters, matching what common authenticator apps expect:
//! SHA-1, 6 digits, 30 second period, one time-step of drift tolerance in
//! either direction.

use anyhow::{anyhow, Result};
use totp_rs::{Algorithm, Secret, TOTP};
use tracing::debug;
use url::Url;

const DIGITS: usize = 6;
const SKEW: u8 = 1;
const STEP: u64 = 30;

/// Freshly generated secret plus the otpauth provisioning URI for QR display.
#[derive(Debug, Clone)]
pub struct ProvisionedSecret {
    /// Base32-encoded secret, for manual entry.
    pub secret: String,
    /// `otpauth://` URI embedding issuer, label, algorithm, digits and period.
    pub uri: String,
}

/// TOTP parameters bound to an issuer and account label.
#[derive(Debug, Clone)]
pub struct TotpScheme {
    issuer: String,
    account: String,
}

impl TotpScheme {
    #[must_use]
    pub fn new(issuer: String, account: String) -> Self {
        Self { issuer, account }
    }

    /// Generate a fresh random secret and its provisioning URI.
    ///
    /// Nothing is persisted here; repeated calls yield unrelated secrets and
    /// only the one later confirmed through enrollment takes effect.
    ///
    /// # Errors
    /// Returns an error if secret generation or scheme construction fails.
    pub fn provision(&self) -> Result<ProvisionedSecret> {
        let secret = Secret::generate_secret();
        let secret_bytes = secret
            .to_bytes()
            .map_err(|e| anyhow!("Secret gen error: {e:?}"))?;

        let totp = self.scheme(secret_bytes)?;
        let secret_base32 = totp.get_secret_base32();
        let uri = self.provisioning_uri(&secret_base32)?;

        Ok(ProvisionedSecret {
            secret: secret_base32,
            uri,
        })
    }

    // `TOTP::get_url` omits parameters that match the library defaults;
    // authenticator apps get the full scheme spelled out.
    fn provisioning_uri(&self, secret_base32: &str) -> Result<String> {
        let mut uri = Url::parse(&format!("otpauth://totp/{}:{}", self.issuer, self.account))
            .map_err(|e| anyhow!("Provisioning URI error: {e}"))?;

        uri.query_pairs_mut()
            .append_pair("secret", secret_base32)
            .append_pair("issuer", &self.issuer)
            .append_pair("algorithm", "SHA1")
            .append_pair("digits", &DIGITS.to_string())
            .append_pair("period", &STEP.to_string());

        Ok(uri.into())
    }

    /// Check a 6-digit token against a base32 secret, allowing one step of
    /// clock drift. Any internal error (bad secret encoding, clock failure)
    /// counts as "not valid".
    #[must_use]
    pub fn validate(&self, secret_base32: &str, token: &str) -> bool {
        let secret_bytes = match Secret::Encoded(secret_base32.to_string()).to_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("Rejecting token: secret is not valid base32: {err:?}");
                return false;
            }
        };

        match self.scheme(secret_bytes) {
            Ok(totp) => totp.check_current(token).unwrap_or(false),
            Err(err) => {
                debug!("Rejecting token: {err}");
                false
            }
        }
    }

    fn scheme(&self, secret_bytes: Vec<u8>) -> Result<TOTP> {
        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW,
            STEP,
            secret_bytes,
            Some(self.issuer.clone()),
            self.account.clone(),
        )
        .map_err(|e| anyhow!("TOTP init error: {e}"))
    }
}
