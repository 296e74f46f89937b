//! Configuration loading and management
//!
//! Configuration is read from YAML; every section is optional and falls back
//! to its defaults. A handful of environment variables override the file.

use crate::actions::INVOICES_PATH;
use crate::core::error::{ConfigError, DashboardError, DashboardResult};
use crate::core::validation::MessageStyle;
use crate::seed::DEFAULT_BCRYPT_COST;
use serde::{Deserialize, Serialize};

/// Environment variable holding the database URL
pub const ENV_DATABASE_URL: &str = "POSTGRES_URL";
/// Environment variable overriding the bind host
pub const ENV_HOST: &str = "DASHBOARD_HOST";
/// Environment variable overriding the bind port
pub const ENV_PORT: &str = "DASHBOARD_PORT";
/// Environment variable naming the YAML file to load
pub const ENV_CONFIG_FILE: &str = "DASHBOARD_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL; the in-memory store is used when absent
    pub url: Option<String>,
    pub max_connections: u32,
    pub require_ssl: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            require_ssl: true,
        }
    }
}

/// Seeder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub bcrypt_cost: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

/// Form validation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub messages: MessageStyle,
}

/// Cached view settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// View invalidated and navigated to after an invoice write
    pub invoices_path: String,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            invoices_path: INVOICES_PATH.to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
    pub validation: ValidationConfig,
    pub views: ViewsConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> DashboardResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path, e),
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> DashboardResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the file named by `DASHBOARD_CONFIG` (or defaults), apply
    /// environment overrides and validate
    pub fn load() -> DashboardResult<Self> {
        let mut config = match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> DashboardResult<()> {
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database.url = Some(url);
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_PORT.to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }
        Ok(())
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> DashboardResult<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "0", "port must be non-zero"));
        }
        if !(4..=31).contains(&self.seed.bcrypt_cost) {
            return Err(invalid(
                "seed.bcrypt_cost",
                &self.seed.bcrypt_cost.to_string(),
                "bcrypt cost must be between 4 and 31",
            ));
        }
        let path = &self.views.invoices_path;
        if !path.starts_with('/') || path.ends_with('/') {
            return Err(invalid(
                "views.invoices_path",
                path,
                "path must start with '/' and must not end with '/'",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str, message: &str) -> DashboardError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.addr(), "0.0.0.0:3000");
        assert_eq!(config.seed.bcrypt_cost, 10);
        assert_eq!(config.views.invoices_path, "/dashboard/invoices");
        assert_eq!(config.validation.messages, MessageStyle::Custom);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        // Should be able to parse it back
        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let parsed = AppConfig::from_yaml_str("validation:\n  messages: default\n").unwrap();

        assert_eq!(parsed.validation.messages, MessageStyle::Default);
        assert_eq!(parsed.server, ServerConfig::default());
    }
}
