//! Admin credential resolution.
//!
//! Credentials are re-resolved on every login attempt from the remote
//! key-value config, falling back per key to the built-in pair when the
//! lookup comes back empty. The fallback policy is a pure function so it can
//! be tested without the network layer.

use secrecy::{ExposeSecret, SecretString};

/// Built-in pair used when the remote config is unavailable or unset.
/// Known weak point of the trust model, kept deliberately: there is exactly
/// one administrative principal and no server-side credential store.
pub const FALLBACK_ADMIN_EMAIL: &str = "admin@auditgate.dev";
pub const FALLBACK_ADMIN_PASSWORD: &str = "auditgate-admin";

/// Raw outcome of the two remote lookups. Either key may individually be
/// absent; absence is not an error.
#[derive(Debug, Default, Clone)]
pub struct RemoteCredentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Effective admin pair a login attempt is compared against.
pub struct AdminCredentials {
    email: String,
    password: SecretString,
}

impl AdminCredentials {
    /// Exact, case-sensitive comparison. No normalization, and no signal
    /// distinguishing a wrong email from a wrong password.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.expose_secret() == password
    }
}

/// Apply the per-key fallback policy to resolved remote values.
#[must_use]
pub fn resolve(remote: RemoteCredentials) -> AdminCredentials {
    AdminCredentials {
        email: remote
            .email
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| FALLBACK_ADMIN_EMAIL.to_string()),
        password: remote
            .password
            .filter(|value| !value.is_empty())
            .map_or_else(
                || SecretString::from(FALLBACK_ADMIN_PASSWORD),
                SecretString::from,
            ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_falls_back_when_remote_is_empty() {
        let resolved = resolve(RemoteCredentials::default());
        assert!(resolved.matches(FALLBACK_ADMIN_EMAIL, FALLBACK_ADMIN_PASSWORD));
    }

    #[test]
    fn resolve_prefers_remote_values() {
        let resolved = resolve(RemoteCredentials {
            email: Some("ops@example.com".to_string()),
            password: Some("remote-pass".to_string()),
        });
        assert!(resolved.matches("ops@example.com", "remote-pass"));
        assert!(!resolved.matches(FALLBACK_ADMIN_EMAIL, FALLBACK_ADMIN_PASSWORD));
    }

    #[test]
    fn resolve_falls_back_per_key() {
        // Only the email came back from the remote lookup.
        let resolved = resolve(RemoteCredentials {
            email: Some("ops@example.com".to_string()),
            password: None,
        });
        assert!(resolved.matches("ops@example.com", FALLBACK_ADMIN_PASSWORD));
    }

    #[test]
    fn resolve_treats_empty_strings_as_absent() {
        let resolved = resolve(RemoteCredentials {
            email: Some(String::new()),
            password: Some(String::new()),
        });
        assert!(resolved.matches(FALLBACK_ADMIN_EMAIL, FALLBACK_ADMIN_PASSWORD));
    }

    #[test]
    fn matches_is_case_sensitive() {
        let resolved = resolve(RemoteCredentials::default());
        assert!(!resolved.matches(&FALLBACK_ADMIN_EMAIL.to_uppercase(), FALLBACK_ADMIN_PASSWORD));
        assert!(!resolved.matches(FALLBACK_ADMIN_EMAIL, "wrong"));
    }
}
