use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("auditgate")
        .about("Admin session and second-factor manager for the audit request portal")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("AUDITGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("config-url")
                .long("config-url")
                .help("Remote key-value config base URL holding admin_email/admin_password; omit to always use the built-in fallback pair")
                .env("AUDITGATE_CONFIG_URL"),
        )
        .arg(
            Arg::new("config-token")
                .long("config-token")
                .help("Bearer token for the remote config service")
                .env("AUDITGATE_CONFIG_TOKEN"),
        )
        .arg(
            Arg::new("frontend-url")
                .long("frontend-url")
                .help("Portal frontend origin allowed by CORS")
                .default_value("http://localhost:5173")
                .env("AUDITGATE_FRONTEND_URL"),
        )
        .arg(
            Arg::new("state-file")
                .long("state-file")
                .help("Path of the device-scope state file (second-factor flag and secret)")
                .default_value("auditgate-state.json")
                .env("AUDITGATE_STATE_FILE"),
        )
        .arg(
            Arg::new("issuer")
                .long("issuer")
                .help("Issuer name shown in authenticator apps")
                .default_value("AuditGate")
                .env("AUDITGATE_ISSUER"),
        )
        .arg(
            Arg::new("account")
                .long("account")
                .help("Account label embedded in the provisioning URI")
                .default_value("admin")
                .env("AUDITGATE_ACCOUNT"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("AUDITGATE_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "auditgate");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Admin session and second-factor manager for the audit request portal"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_defaults() {
        let command = new();
        let matches = command.get_matches_from(vec!["auditgate"]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(matches.get_one::<String>("config-url"), None);
        assert_eq!(
            matches
                .get_one::<String>("frontend-url")
                .map(String::as_str),
            Some("http://localhost:5173")
        );
        assert_eq!(
            matches.get_one::<String>("state-file").map(String::as_str),
            Some("auditgate-state.json")
        );
        assert_eq!(
            matches.get_one::<String>("issuer").map(String::as_str),
            Some("AuditGate")
        );
        assert_eq!(
            matches.get_one::<String>("account").map(String::as_str),
            Some("admin")
        );
    }

    #[test]
    fn test_check_port_and_config_url() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "auditgate",
            "--port",
            "8443",
            "--config-url",
            "https://config.example.com/store-id",
            "--config-token",
            "token",
        ]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8443));
        assert_eq!(
            matches.get_one::<String>("config-url").map(String::as_str),
            Some("https://config.example.com/store-id")
        );
        assert_eq!(
            matches
                .get_one::<String>("config-token")
                .map(String::as_str),
            Some("token")
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("AUDITGATE_PORT", Some("443")),
                ("AUDITGATE_CONFIG_URL", Some("https://config.example.com")),
                ("AUDITGATE_FRONTEND_URL", Some("https://audit.example.com")),
                (
                    "AUDITGATE_STATE_FILE",
                    Some("/var/lib/auditgate/state.json"),
                ),
                ("AUDITGATE_ISSUER", Some("FitoAudit")),
                ("AUDITGATE_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["auditgate"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>("config-url").map(String::as_str),
                    Some("https://config.example.com")
                );
                assert_eq!(
                    matches
                        .get_one::<String>("frontend-url")
                        .map(String::as_str),
                    Some("https://audit.example.com")
                );
                assert_eq!(
                    matches.get_one::<String>("state-file").map(String::as_str),
                    Some("/var/lib/auditgate/state.json")
                );
                assert_eq!(
                    matches.get_one::<String>("issuer").map(String::as_str),
                    Some("FitoAudit")
                );
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("AUDITGATE_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["auditgate"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("AUDITGATE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["auditgate".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
