//! Auth endpoints: login, session, and second-factor management.
//!
//! Every handler resolves to a typed success/failure body; expected failures
//! (credential mismatch, invalid token, skipped password step) are never HTTP
//! errors, so the frontend can act on them without a recovery path.

pub(crate) mod login;
pub(crate) mod session;
pub(crate) mod twofactor;
pub(crate) mod types;
