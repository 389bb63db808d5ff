use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ADMIN_PASSWORD must be set in .env file or environment")]
    MissingAdminPassword,

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Database connection URL
    /// Format: sqlite://PATH/TO/FILE.db
    pub database_url: String,

    /// Shared password that unlocks admin operations
    pub admin_password: String,

    /// Name printed at the top of every receipt
    pub shop_name: String,

    /// Maximum payload size for all requests (in bytes)
    /// Default: 1MB (1024 * 1024)
    pub max_payload_size: usize,

    /// Maximum number of pooled database connections
    pub max_db_connections: u32,

    pub host: String,
    pub port: u16,

    /// Directory for rolling log files
    pub log_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required environment variables:
    /// - ADMIN_PASSWORD: shared admin password
    ///
    /// Optional environment variables:
    /// - DATABASE_URL: SQLite connection string (default: sqlite://alteration_shop.db)
    /// - SHOP_NAME: receipt header (default: Ebenezer Alterations)
    /// - MAX_PAYLOAD_SIZE: Maximum request payload size in bytes (default: 1048576 = 1MB)
    /// - MAX_DB_CONNECTIONS: pool size (default: 5)
    /// - HOST / PORT: bind address (default: 127.0.0.1:8080)
    /// - LOG_DIR: log directory (default: logs)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let admin_password = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingAdminPassword)?;

        Ok(Config {
            database_url: var_or("DATABASE_URL", "sqlite://alteration_shop.db"),
            admin_password,
            shop_name: var_or("SHOP_NAME", "Ebenezer Alterations"),
            max_payload_size: parse_or("MAX_PAYLOAD_SIZE", 1024 * 1024)?,
            max_db_connections: parse_or("MAX_DB_CONNECTIONS", 5)?,
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 8080)?,
            log_dir: var_or("LOG_DIR", "logs"),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
