use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub api_base_url: String,
    pub terminal_url: String,
    pub api_token: Option<String>,
    pub aro_id: Option<i64>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub logs_poll_interval_secs: u64,
    pub telemetry_poll_interval_secs: u64,
    pub request_list_count: i64,
}

impl AppConfig {
    #[must_use]
    pub fn logs_poll_interval(&self) -> Duration {
        Duration::from_secs(self.logs_poll_interval_secs)
    }

    #[must_use]
    pub fn telemetry_poll_interval(&self) -> Duration {
        Duration::from_secs(self.telemetry_poll_interval_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("terminal_url", &self.terminal_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("aro_id", &self.aro_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("logs_poll_interval_secs", &self.logs_poll_interval_secs)
            .field(
                "telemetry_poll_interval_secs",
                &self.telemetry_poll_interval_secs,
            )
            .field("request_list_count", &self.request_list_count)
            .finish()
    }
}
