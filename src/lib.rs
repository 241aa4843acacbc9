//! # Auditgate
//!
//! Backend for the security-audit request portal's admin area. The portal
//! itself (request submission, report browsing, page copy) is a static SPA;
//! the one subsystem with real invariants lives here: the admin login flow
//! with an optional TOTP second factor.
//!
//! ## Login flow
//!
//! Password first, then the 6-digit token when the second factor is enabled.
//! The session only becomes valid after both steps; the token step refuses
//! to run without a prior successful password check. See [`auth::manager`]
//! for the state machine.
//!
//! ## Trust model
//!
//! There is exactly one administrative principal and no server-side
//! credential store. The admin pair is fetched per login attempt from a
//! remote key-value config with built-in fallbacks, and compared in
//! plaintext. This is a known, deliberate characteristic of the portal, not
//! a pattern to copy.

pub mod api;
pub mod auth;
pub mod cli;
pub mod remote;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
