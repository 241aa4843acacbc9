use crate::api;
use crate::auth::{FileStore, FlagStore, MemoryStore, SessionManager, TotpScheme};
use crate::cli::actions::Action;
use crate::remote::RemoteConfig;
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    let Action::Server {
        port,
        config_url,
        config_token,
        frontend_url,
        state_file,
        issuer,
        account,
    } = action;

    let base_url = config_url
        .map(|url| Url::parse(&url).with_context(|| format!("Invalid config URL: {url}")))
        .transpose()?;
    let token = config_token.map(SecretString::from);
    let remote = RemoteConfig::new(base_url, token)?;

    // Session scope dies with the process; the device scope survives in the
    // state file.
    let session_store: Arc<dyn FlagStore> = Arc::new(MemoryStore::new());
    let device_store: Arc<dyn FlagStore> = Arc::new(FileStore::new(PathBuf::from(state_file)));

    let manager = Arc::new(SessionManager::new(
        session_store,
        device_store,
        remote,
        TotpScheme::new(issuer, account),
    ));

    api::new(port, &frontend_url, manager).await?;

    Ok(())
}
