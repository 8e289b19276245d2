//! Gate configuration: immutable after startup, shared by reference.

/// Stable identity of the built-in failure responder. The failure handler
/// comparison is done on tags, not on handler types.
pub const FAILURE_APP_TAG: &str = "gardisto::unauthenticated";

const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_LOGOUT_PATH: &str = "/logout";
const DEFAULT_FAILURE_PATH: &str = "/";
const DEFAULT_SUCCESS_PATH: &str = "/";
const DEFAULT_OAUTH_CALLBACK_PATH: &str = "/oauth_callback";
const DEFAULT_ERROR_MESSAGE: &str = "Could not log you in.";
const DEFAULT_SUCCESS_MESSAGE: &str = "You have logged in successfully.";
const DEFAULT_LOGIN_TEMPLATE: &str = "sessions/login";

/// Authentication options, read-only during request handling.
///
/// Option names and defaults are stable so deployments can carry their
/// settings across versions unchanged.
#[derive(Clone, Debug)]
pub struct GateConfig {
    sessions: bool,
    auth_login_path: String,
    auth_logout_path: String,
    auth_failure_path: String,
    auth_success_path: String,
    auth_use_referrer: bool,
    auth_error_message: String,
    auth_success_message: String,
    auth_login_template: String,
    auth_layout: Option<String>,
    auth_use_oauth: bool,
    auth_oauth_callback_path: String,
    auth_failure_app: String,
}

impl GateConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: true,
            auth_login_path: DEFAULT_LOGIN_PATH.to_string(),
            auth_logout_path: DEFAULT_LOGOUT_PATH.to_string(),
            auth_failure_path: DEFAULT_FAILURE_PATH.to_string(),
            auth_success_path: DEFAULT_SUCCESS_PATH.to_string(),
            auth_use_referrer: false,
            auth_error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            auth_success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            auth_login_template: DEFAULT_LOGIN_TEMPLATE.to_string(),
            auth_layout: None,
            auth_use_oauth: false,
            auth_oauth_callback_path: DEFAULT_OAUTH_CALLBACK_PATH.to_string(),
            auth_failure_app: FAILURE_APP_TAG.to_string(),
        }
    }

    #[must_use]
    pub fn with_sessions(mut self, sessions: bool) -> Self {
        self.sessions = sessions;
        self
    }

    #[must_use]
    pub fn with_auth_login_path(mut self, path: String) -> Self {
        self.auth_login_path = path;
        self
    }

    #[must_use]
    pub fn with_auth_logout_path(mut self, path: String) -> Self {
        self.auth_logout_path = path;
        self
    }

    #[must_use]
    pub fn with_auth_failure_path(mut self, path: String) -> Self {
        self.auth_failure_path = path;
        self
    }

    #[must_use]
    pub fn with_auth_success_path(mut self, path: String) -> Self {
        self.auth_success_path = path;
        self
    }

    #[must_use]
    pub fn with_auth_use_referrer(mut self, use_referrer: bool) -> Self {
        self.auth_use_referrer = use_referrer;
        self
    }

    #[must_use]
    pub fn with_auth_error_message(mut self, message: String) -> Self {
        self.auth_error_message = message;
        self
    }

    #[must_use]
    pub fn with_auth_success_message(mut self, message: String) -> Self {
        self.auth_success_message = message;
        self
    }

    #[must_use]
    pub fn with_auth_login_template(mut self, template: String) -> Self {
        self.auth_login_template = template;
        self
    }

    #[must_use]
    pub fn with_auth_layout(mut self, layout: Option<String>) -> Self {
        self.auth_layout = layout;
        self
    }

    #[must_use]
    pub fn with_auth_use_oauth(mut self, use_oauth: bool) -> Self {
        self.auth_use_oauth = use_oauth;
        self
    }

    #[must_use]
    pub fn with_auth_oauth_callback_path(mut self, path: String) -> Self {
        self.auth_oauth_callback_path = path;
        self
    }

    #[must_use]
    pub fn with_auth_failure_app(mut self, tag: String) -> Self {
        self.auth_failure_app = tag;
        self
    }

    #[must_use]
    pub fn sessions(&self) -> bool {
        self.sessions
    }

    #[must_use]
    pub fn auth_login_path(&self) -> &str {
        &self.auth_login_path
    }

    #[must_use]
    pub fn auth_logout_path(&self) -> &str {
        &self.auth_logout_path
    }

    #[must_use]
    pub fn auth_failure_path(&self) -> &str {
        &self.auth_failure_path
    }

    #[must_use]
    pub fn auth_success_path(&self) -> &str {
        &self.auth_success_path
    }

    #[must_use]
    pub fn auth_use_referrer(&self) -> bool {
        self.auth_use_referrer
    }

    #[must_use]
    pub fn auth_error_message(&self) -> &str {
        &self.auth_error_message
    }

    #[must_use]
    pub fn auth_success_message(&self) -> &str {
        &self.auth_success_message
    }

    #[must_use]
    pub fn auth_login_template(&self) -> &str {
        &self.auth_login_template
    }

    #[must_use]
    pub fn auth_layout(&self) -> Option<&str> {
        self.auth_layout.as_deref()
    }

    #[must_use]
    pub fn auth_use_oauth(&self) -> bool {
        self.auth_use_oauth
    }

    #[must_use]
    pub fn auth_oauth_callback_path(&self) -> &str {
        &self.auth_oauth_callback_path
    }

    #[must_use]
    pub fn auth_failure_app(&self) -> &str {
        &self.auth_failure_app
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_config_defaults_and_overrides() {
        let config = GateConfig::new();

        assert!(config.sessions());
        assert_eq!(config.auth_login_path(), "/login");
        assert_eq!(config.auth_logout_path(), "/logout");
        assert_eq!(config.auth_failure_path(), "/");
        assert_eq!(config.auth_success_path(), "/");
        assert!(!config.auth_use_referrer());
        assert_eq!(config.auth_error_message(), "Could not log you in.");
        assert_eq!(
            config.auth_success_message(),
            "You have logged in successfully."
        );
        assert_eq!(config.auth_login_template(), "sessions/login");
        assert_eq!(config.auth_layout(), None);
        assert!(!config.auth_use_oauth());
        assert_eq!(config.auth_oauth_callback_path(), "/oauth_callback");
        assert_eq!(config.auth_failure_app(), FAILURE_APP_TAG);

        let config = config
            .with_auth_login_path("/signin".to_string())
            .with_auth_failure_path("/signin".to_string())
            .with_auth_use_referrer(true)
            .with_auth_layout(Some("admin".to_string()))
            .with_auth_failure_app("app::custom".to_string());

        assert_eq!(config.auth_login_path(), "/signin");
        assert_eq!(config.auth_failure_path(), "/signin");
        assert!(config.auth_use_referrer());
        assert_eq!(config.auth_layout(), Some("admin"));
        assert_eq!(config.auth_failure_app(), "app::custom");
    }
}
