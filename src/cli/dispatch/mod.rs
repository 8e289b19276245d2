use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let get_path = |name: &str, default: &str| -> String {
        matches
            .get_one::<String>(name)
            .map_or_else(|| default.to_string(), String::to_string)
    };

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        login_path: get_path("login-path", "/login"),
        logout_path: get_path("logout-path", "/logout"),
        failure_path: get_path("failure-path", "/"),
        success_path: get_path("success-path", "/"),
        use_referrer: matches.get_flag("use-referrer"),
        user: get_path("user", "admin"),
        password: matches
            .get_one::<String>("password")
            .map(String::to_string)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --password"))?,
    })
}
