//! Integration tests for configuration loading

use dashboard::config::{ENV_DATABASE_URL, ENV_HOST, ENV_PORT};
use dashboard::prelude::*;
use std::collections::HashMap;
use std::io::Write;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_load_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
server:
  port: 8080
database:
  url: postgres://localhost/dashboard
  require_ssl: false
seed:
  bcrypt_cost: 12
validation:
  messages: default
views:
  invoices_path: /app/invoices
"#
    )
    .unwrap();

    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.server.addr(), "0.0.0.0:8080");
    assert_eq!(
        config.database.url.as_deref(),
        Some("postgres://localhost/dashboard")
    );
    assert!(!config.database.require_ssl);
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.seed.bcrypt_cost, 12);
    assert_eq!(config.validation.messages, MessageStyle::Default);
    assert_eq!(config.views.invoices_path, "/app/invoices");
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_config_error() {
    let err = AppConfig::from_yaml_file("/nonexistent/dashboard.yaml").unwrap_err();
    assert!(matches!(err, DashboardError::Config(_)));
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "server: [not, a, map]").unwrap();

    let err = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_env_overrides_file_values() {
    let mut config = AppConfig::from_yaml_str("server:\n  host: 127.0.0.1\n  port: 8080\n").unwrap();

    config
        .apply_env(env(&[
            (ENV_DATABASE_URL, "postgres://db/prod"),
            (ENV_HOST, "10.0.0.1"),
            (ENV_PORT, "9000"),
        ]))
        .unwrap();

    assert_eq!(config.server.addr(), "10.0.0.1:9000");
    assert_eq!(config.database.url.as_deref(), Some("postgres://db/prod"));
}

#[test]
fn test_env_port_must_be_numeric() {
    let mut config = AppConfig::default();
    let result = config.apply_env(env(&[(ENV_PORT, "http")]));
    assert!(result.is_err());
    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut config = AppConfig::default();
    config.seed.bcrypt_cost = 3;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.server.port = 0;
    assert!(config.validate().is_err());

    for path in ["dashboard/invoices", "/dashboard/invoices/", "/"] {
        let mut config = AppConfig::default();
        config.views.invoices_path = path.to_string();
        assert!(config.validate().is_err(), "path {:?}", path);
    }
}
