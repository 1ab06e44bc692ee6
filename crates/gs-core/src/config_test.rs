use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "GS_ENV"));
}

#[test]
fn build_app_config_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "http://localhost:5000");
    assert_eq!(cfg.terminal_url, "ws://localhost:9067/ws");
    assert!(cfg.api_token.is_none());
    assert!(cfg.aro_id.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "gs-console/0.1");
    assert_eq!(cfg.logs_poll_interval_secs, 10);
    assert_eq!(cfg.telemetry_poll_interval_secs, 30);
    assert_eq!(cfg.request_list_count, 100);
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_url() {
    let mut map = HashMap::new();
    map.insert("GS_API_BASE_URL", "https://gs.example.org/api/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://gs.example.org/api");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("GS_API_BASE_URL", "ftp://gs.example.org");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GS_API_BASE_URL"),
        "expected InvalidEnvVar(GS_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_http_terminal_url() {
    let mut map = HashMap::new();
    map.insert("GS_TERMINAL_URL", "http://localhost:9067/ws");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GS_TERMINAL_URL"),
        "expected InvalidEnvVar(GS_TERMINAL_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_aro_id() {
    let mut map = HashMap::new();
    map.insert("GS_ARO_ID", "42");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.aro_id, Some(42));
}

#[test]
fn build_app_config_rejects_invalid_aro_id() {
    let mut map = HashMap::new();
    map.insert("GS_ARO_ID", "forty-two");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GS_ARO_ID"),
        "expected InvalidEnvVar(GS_ARO_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_poll_interval() {
    let mut map = HashMap::new();
    map.insert("GS_LOGS_POLL_INTERVAL_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GS_LOGS_POLL_INTERVAL_SECS"),
        "expected InvalidEnvVar(GS_LOGS_POLL_INTERVAL_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_telemetry_interval_override() {
    let mut map = HashMap::new();
    map.insert("GS_TELEMETRY_POLL_INTERVAL_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.telemetry_poll_interval().as_secs(), 5);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("GS_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_ignores_empty_token() {
    let mut map = HashMap::new();
    map.insert("GS_API_TOKEN", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_token.is_none());
}

#[test]
fn debug_output_redacts_token() {
    let mut map = HashMap::new();
    map.insert("GS_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("[redacted]"));
}
