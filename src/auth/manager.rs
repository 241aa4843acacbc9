//! Session & second-factor manager.
//!
//! Owns the three pieces of auth state the portal relies on: the full-session
//! flag, the transient "password passed, second factor outstanding" marker,
//! and the second-factor configuration (enabled flag plus secret). The flags
//! live in two stores with different lifetimes: the session scope dies with
//! the process, the device scope persists.
//!
//! Per login sequence the state machine is:
//!
//! ```text
//! UNAUTHENTICATED --login(ok, 2FA off)--> AUTHENTICATED
//! UNAUTHENTICATED --login(ok, 2FA on)---> PENDING_2FA
//! PENDING_2FA     --verify(ok)----------> AUTHENTICATED
//! PENDING_2FA     --verify(fail)--------> PENDING_2FA
//! PENDING_2FA     --logout--------------> UNAUTHENTICATED
//! AUTHENTICATED   --logout--------------> UNAUTHENTICATED
//! ```
//!
//! Storage failures never abort a transition: the in-memory state still
//! changes and the failure is only logged. No operation here returns an
//! error to its caller; every path resolves to a typed outcome.

use crate::auth::credentials;
use crate::auth::storage::FlagStore;
use crate::auth::totp::{ProvisionedSecret, TotpScheme};
use crate::remote::RemoteConfig;
use anyhow::Result;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

const SESSION_KEY: &str = "auditgate_auth_session";
const ATTEMPT_KEY: &str = "auditgate_auth_attempt";
const TWO_FACTOR_ENABLED_KEY: &str = "auditgate_2fa_enabled";
const TWO_FACTOR_SECRET_KEY: &str = "auditgate_2fa_secret";

/// Outcome of a password login attempt.
///
/// `success` with `needs_2fa` means the password matched but the session is
/// not established yet; the caller routes to token verification next. A
/// mismatch is the single combined failure, deliberately not distinguishing
/// unknown email from wrong password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub needs_2fa: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct SessionFlags {
    authenticated: bool,
    pending_attempt: bool,
    two_factor_enabled: bool,
}

pub struct SessionManager {
    flags: RwLock<SessionFlags>,
    session_store: Arc<dyn FlagStore>,
    device_store: Arc<dyn FlagStore>,
    remote: RemoteConfig,
    totp: TotpScheme,
}

impl SessionManager {
    /// Restore flags from the two stores. A read failure on either scope is
    /// treated as "false", never propagated.
    #[must_use]
    pub fn new(
        session_store: Arc<dyn FlagStore>,
        device_store: Arc<dyn FlagStore>,
        remote: RemoteConfig,
        totp: TotpScheme,
    ) -> Self {
        let mut restored = SessionFlags {
            authenticated: restore_flag(session_store.as_ref(), SESSION_KEY),
            pending_attempt: restore_flag(session_store.as_ref(), ATTEMPT_KEY),
            two_factor_enabled: restore_flag(device_store.as_ref(), TWO_FACTOR_ENABLED_KEY),
        };

        // Enabled without a secret would make every verification fail;
        // restore it as disabled instead.
        if restored.two_factor_enabled
            && !matches!(device_store.get(TWO_FACTOR_SECRET_KEY), Ok(Some(_)))
        {
            warn!("Second factor flagged enabled but no secret is stored, treating as disabled");
            restored.two_factor_enabled = false;
        }

        Self {
            flags: RwLock::new(restored),
            session_store,
            device_store,
            remote,
            totp,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_flags().authenticated
    }

    #[must_use]
    pub fn second_factor_enabled(&self) -> bool {
        self.read_flags().two_factor_enabled
    }

    /// Password step of the login sequence.
    ///
    /// Credentials are re-resolved on every attempt: both remote keys are
    /// fetched concurrently and either may individually fall back to the
    /// built-in pair. The combined fetch-compare-transition is one atomic
    /// step from the caller's perspective.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let admin = credentials::resolve(self.remote.admin_credentials().await);

        if !admin.matches(email, password) {
            return LoginOutcome {
                success: false,
                needs_2fa: false,
            };
        }

        if self.second_factor_enabled() {
            // Password passed; the session is only established once the
            // token check succeeds.
            self.write_flags(|flags| flags.pending_attempt = true);
            self.persist_set(Scope::Session, ATTEMPT_KEY, "true");
            LoginOutcome {
                success: true,
                needs_2fa: true,
            }
        } else {
            self.write_flags(|flags| flags.authenticated = true);
            self.persist_set(Scope::Session, SESSION_KEY, "true");
            info!("Admin session established");
            LoginOutcome {
                success: true,
                needs_2fa: false,
            }
        }
    }

    /// Clear the session and any pending attempt. Idempotent.
    pub fn logout(&self) {
        self.write_flags(|flags| {
            flags.authenticated = false;
            flags.pending_attempt = false;
        });
        self.persist_remove(Scope::Session, SESSION_KEY);
        self.persist_remove(Scope::Session, ATTEMPT_KEY);
    }

    /// Generate a fresh secret and provisioning URI for enrollment.
    ///
    /// Nothing is persisted until [`enable_second_factor`] confirms the
    /// secret with a valid token.
    ///
    /// [`enable_second_factor`]: Self::enable_second_factor
    ///
    /// # Errors
    /// Returns an error if secret generation fails.
    pub fn generate_secret(&self) -> Result<ProvisionedSecret> {
        self.totp.provision()
    }

    /// Confirm enrollment: validate `token` against `secret` and, on
    /// success, persist the secret and enable the second factor.
    pub fn enable_second_factor(&self, secret: &str, token: &str) -> bool {
        if !self.totp.validate(secret, token) {
            return false;
        }

        self.persist_set(Scope::Device, TWO_FACTOR_SECRET_KEY, secret);
        self.persist_set(Scope::Device, TWO_FACTOR_ENABLED_KEY, "true");
        self.write_flags(|flags| flags.two_factor_enabled = true);
        info!("Second factor enabled");
        true
    }

    /// Drop the second factor entirely: secret and enabled flag. The caller
    /// is trusted to have authorized this.
    pub fn disable_second_factor(&self) {
        self.persist_remove(Scope::Device, TWO_FACTOR_SECRET_KEY);
        self.persist_remove(Scope::Device, TWO_FACTOR_ENABLED_KEY);
        self.write_flags(|flags| flags.two_factor_enabled = false);
        info!("Second factor disabled");
    }

    /// Token step of the login sequence.
    ///
    /// Refuses outright unless a pending attempt exists, so the entry point
    /// cannot be used to skip the password check. Failure leaves the pending
    /// attempt in place; the caller may retry.
    pub fn verify_token(&self, token: &str) -> bool {
        if !self.read_flags().pending_attempt {
            return false;
        }

        let secret = match self.device_store.get(TWO_FACTOR_SECRET_KEY) {
            Ok(Some(secret)) => secret,
            Ok(None) => return false,
            Err(err) => {
                warn!("Failed to read second-factor secret: {err}");
                return false;
            }
        };

        if !self.totp.validate(&secret, token) {
            return false;
        }

        self.write_flags(|flags| {
            flags.authenticated = true;
            flags.pending_attempt = false;
        });
        self.persist_set(Scope::Session, SESSION_KEY, "true");
        self.persist_remove(Scope::Session, ATTEMPT_KEY);
        info!("Admin session established after second factor");
        true
    }

    fn read_flags(&self) -> SessionFlags {
        *self.flags.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_flags(&self, mutate: impl FnOnce(&mut SessionFlags)) {
        let mut flags = self.flags.write().unwrap_or_else(PoisonError::into_inner);
        mutate(&mut flags);
    }

    fn store(&self, scope: Scope) -> &dyn FlagStore {
        match scope {
            Scope::Session => self.session_store.as_ref(),
            Scope::Device => self.device_store.as_ref(),
        }
    }

    fn persist_set(&self, scope: Scope, key: &str, value: &str) {
        if let Err(err) = self.store(scope).set(key, value) {
            warn!("Failed to persist {key}: {err}");
        }
    }

    fn persist_remove(&self, scope: Scope, key: &str) {
        if let Err(err) = self.store(scope).remove(key) {
            warn!("Failed to clear {key}: {err}");
        }
    }
}

#[derive(Clone, Copy)]
enum Scope {
    Session,
    Device,
}

fn restore_flag(store: &dyn FlagStore, key: &str) -> bool {
    match store.get(key) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(err) => {
            warn!("Failed to restore {key}, assuming unset: {err}");
            false
        }
    }
}
