//! Configuration utilities.

/// TOML configuration (`sample-auth.toml`).
pub mod toml_config;

pub use toml_config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, ServerConfig};
