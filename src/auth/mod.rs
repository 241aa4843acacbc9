//! Admin authentication: session lifecycle, credential resolution, and the
//! TOTP second factor.
//!
//! The [`SessionManager`] owns all mutable auth state; the HTTP layer and
//! CLI only call its operations and read the derived flags.

pub mod credentials;
pub mod manager;
pub mod storage;
pub mod totp;

pub use manager::{LoginOutcome, SessionManager};
pub use storage::{FileStore, FlagStore, MemoryStore};
pub use totp::{ProvisionedSecret, TotpScheme};
