use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        config_url: matches.get_one::<String>("config-url").cloned(),
        config_token: matches.get_one::<String>("config-token").cloned(),
        frontend_url: matches
            .get_one::<String>("frontend-url")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing argument: --frontend-url"))?,
        state_file: matches
            .get_one::<String>("state-file")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing argument: --state-file"))?,
        issuer: matches
            .get_one::<String>("issuer")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing argument: --issuer"))?,
        account: matches
            .get_one::<String>("account")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing argument: --account"))?,
    })
}
