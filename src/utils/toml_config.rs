//! TOML-based configuration for sample-auth
//!
//! Server, authentication and database settings are read from a TOML file
//! (`sample-auth.toml`). Every field has a default, so an empty file (or no
//! file at all) yields a working local setup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from sample-auth.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the persistent remember-me cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the remember cookie `Secure` (HTTPS only)
    #[serde(default)]
    pub cookie_secure: bool,

    /// Hide the remember cookie from page scripts
    #[serde(default = "default_true")]
    pub cookie_http_only: bool,

    /// Replace the stored remember digest on sign-out, so cookies issued
    /// before the sign-out stop resolving
    #[serde(default)]
    pub rotate_token_on_sign_out: bool,

    /// Where the access filter sends anonymous requests
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
}

fn default_cookie_name() -> String {
    "remember_token".to_string()
}

fn default_true() -> bool {
    true
}

fn default_sign_in_path() -> String {
    "/signin".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            cookie_http_only: default_true(),
            rotate_token_on_sign_out: false,
            sign_in_path: default_sign_in_path(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:`
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "./data/users.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Config(err.to_string())
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.auth.cookie_name.trim();
        if name.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.cookie_name must not be empty".to_string(),
            ));
        }
        if name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || "()<>@,;:\\\"/[]?={}".contains(c))
        {
            return Err(ConfigError::ValidationError(format!(
                "auth.cookie_name '{}' is not a valid cookie name",
                name
            )));
        }

        if !self.auth.sign_in_path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "auth.sign_in_path '{}' must start with '/'",
                self.auth.sign_in_path
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[auth]
cookie_name = "remember_token"
cookie_secure = true
rotate_token_on_sign_out = true
sign_in_path = "/login"

[database]
url = ":memory:"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = AppConfig::from_toml(&create_test_config()).expect("Failed to parse config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.auth.cookie_secure);
        assert!(config.auth.cookie_http_only);
        assert!(config.auth.rotate_token_on_sign_out);
        assert_eq!(config.auth.sign_in_path, "/login");
        assert_eq!(config.database.url, ":memory:");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config should parse");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.cookie_name, "remember_token");
        assert!(!config.auth.cookie_secure);
        assert!(!config.auth.rotate_token_on_sign_out);
        assert_eq!(config.auth.sign_in_path, "/signin");
    }

    #[test]
    fn test_validation_rejects_bad_cookie_name() {
        let result = AppConfig::from_toml("[auth]\ncookie_name = \"remember token\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = AppConfig::from_toml("[auth]\ncookie_name = \"\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_rejects_relative_sign_in_path() {
        let result = AppConfig::from_toml("[auth]\nsign_in_path = \"signin\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load("/nonexistent/sample-auth.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("sample-auth.toml");
        fs::write(&path, create_test_config()).unwrap();

        let config = AppConfig::load(&path).expect("should load config");
        assert_eq!(config.server.port, 8080);
    }
}
