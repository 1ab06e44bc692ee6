use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load console configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load console configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_interval = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let secs = parse_u64(var, default)?;
        if secs == 0 {
            return Err(invalid(var, "interval must be greater than zero".to_string()));
        }
        Ok(secs)
    };

    let parse_url = |var: &str, default: &str, schemes: &[&str]| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim_end_matches('/').to_string();
        if !schemes
            .iter()
            .any(|scheme| trimmed.starts_with(&format!("{scheme}://")))
        {
            return Err(invalid(
                var,
                format!("expected a {} URL, got \"{raw}\"", schemes.join("/")),
            ));
        }
        Ok(trimmed)
    };

    let env = parse_environment(&or_default("GS_ENV", "development"))?;
    let log_level = or_default("GS_LOG_LEVEL", "info");
    let api_base_url = parse_url("GS_API_BASE_URL", "http://localhost:5000", &["http", "https"])?;
    let terminal_url = parse_url("GS_TERMINAL_URL", "ws://localhost:9067/ws", &["ws", "wss"])?;
    let api_token = lookup("GS_API_TOKEN").ok().filter(|t| !t.is_empty());

    let aro_id = match lookup("GS_ARO_ID") {
        Ok(raw) => Some(
            raw.parse::<i64>()
                .map_err(|e| invalid("GS_ARO_ID", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let request_timeout_secs = parse_u64("GS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GS_USER_AGENT", "gs-console/0.1");
    let logs_poll_interval_secs = parse_interval("GS_LOGS_POLL_INTERVAL_SECS", "10")?;
    let telemetry_poll_interval_secs = parse_interval("GS_TELEMETRY_POLL_INTERVAL_SECS", "30")?;
    let request_list_count = or_default("GS_REQUEST_LIST_COUNT", "100")
        .parse::<i64>()
        .map_err(|e| invalid("GS_REQUEST_LIST_COUNT", e.to_string()))?;

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        terminal_url,
        api_token,
        aro_id,
        request_timeout_secs,
        user_agent,
        logs_poll_interval_secs,
        telemetry_poll_interval_secs,
        request_list_count,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GS_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
