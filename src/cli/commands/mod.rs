use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
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

    Command::new("gardisto")
        .about("Session authentication gate for axum applications")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("GARDISTO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("login-path")
                .long("login-path")
                .help("Path serving the login form and accepting credentials")
                .default_value("/login")
                .env("GARDISTO_LOGIN_PATH"),
        )
        .arg(
            Arg::new("logout-path")
                .long("logout-path")
                .help("Path terminating the session")
                .default_value("/logout")
                .env("GARDISTO_LOGOUT_PATH"),
        )
        .arg(
            Arg::new("failure-path")
                .long("failure-path")
                .help("Redirect target for unauthenticated requests")
                .default_value("/")
                .env("GARDISTO_FAILURE_PATH"),
        )
        .arg(
            Arg::new("success-path")
                .long("success-path")
                .help("Redirect target after login and logout")
                .default_value("/")
                .env("GARDISTO_SUCCESS_PATH"),
        )
        .arg(
            Arg::new("use-referrer")
                .long("use-referrer")
                .help("Redirect back to the originally requested page after login")
                .env("GARDISTO_USE_REFERRER")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .help("Username accepted by the built-in credential strategy")
                .default_value("admin")
                .env("GARDISTO_USER"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Password accepted by the built-in credential strategy")
                .env("GARDISTO_PASSWORD")
                .required(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("GARDISTO_LOG_LEVEL")
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

        assert_eq!(command.get_name(), "gardisto");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Session authentication gate for axum applications"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_paths() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "gardisto",
            "--port",
            "8080",
            "--password",
            "hunter2",
            "--failure-path",
            "/login",
            "--use-referrer",
        ]);

        assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(8080));
        assert_eq!(
            matches.get_one::<String>("login-path").map(String::as_str),
            Some("/login")
        );
        assert_eq!(
            matches.get_one::<String>("logout-path").map(String::as_str),
            Some("/logout")
        );
        assert_eq!(
            matches
                .get_one::<String>("failure-path")
                .map(String::as_str),
            Some("/login")
        );
        assert_eq!(matches.get_flag("use-referrer"), true);
        assert_eq!(
            matches.get_one::<String>("user").map(String::as_str),
            Some("admin")
        );
        assert_eq!(
            matches.get_one::<String>("password").map(String::as_str),
            Some("hunter2")
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("GARDISTO_PORT", Some("443")),
                ("GARDISTO_PASSWORD", Some("hunter2")),
                ("GARDISTO_USER", Some("alice")),
                ("GARDISTO_SUCCESS_PATH", Some("/home")),
                ("GARDISTO_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["gardisto"]);
                assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(443));
                assert_eq!(
                    matches.get_one::<String>("user").map(String::as_str),
                    Some("alice")
                );
                assert_eq!(
                    matches
                        .get_one::<String>("success-path")
                        .map(String::as_str),
                    Some("/home")
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("GARDISTO_LOG_LEVEL", Some(level)),
                    ("GARDISTO_PASSWORD", Some("hunter2")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["gardisto"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").map(|s| *s),
                        Some(index as u8)
                    );
                },
            );
        }
    }
}
