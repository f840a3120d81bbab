use std::collections::HashMap;

use pretty_assertions::assert_eq;
use recurslot_api::config::{parse_log_level, ApiConfig};
use rstest::rstest;
use tracing::Level;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_defaults_with_database_url() {
    let config = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/recurslot")]))
        .unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout().as_secs(), 30);
}

#[test]
fn test_missing_database_url_is_rejected() {
    let err = ApiConfig::from_lookup(lookup(&[])).unwrap_err();

    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn test_overrides_are_read() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/recurslot"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("API_CORS_ORIGINS", "https://a.example.com, https://b.example.com,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("LOG_LEVEL", "debug"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "https://a.example.com".to_string(),
            "https://b.example.com".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.log_level, Level::DEBUG);
}

#[rstest]
#[case("API_PORT", "http")]
#[case("API_PORT", "70000")]
#[case("API_REQUEST_TIMEOUT_SECONDS", "0")]
#[case("API_REQUEST_TIMEOUT_SECONDS", "forever")]
fn test_invalid_values_are_rejected(#[case] name: &str, #[case] value: &str) {
    let err = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db/x"), (name, value)]))
        .unwrap_err();

    assert!(err.to_string().contains(name), "unexpected error: {}", err);
}

#[rstest]
#[case(Some("TRACE"), Level::TRACE)]
#[case(Some("warn"), Level::WARN)]
#[case(Some("error"), Level::ERROR)]
#[case(Some("verbose"), Level::INFO)]
#[case(None, Level::INFO)]
fn test_log_level_parsing(#[case] value: Option<&str>, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}
