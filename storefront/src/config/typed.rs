use super::{AppConfig, ConfigError};

/// A strongly-typed configuration section rooted at a key prefix.
pub trait ConfigProperties: Sized {
    /// The key prefix (e.g. `"database"`).
    fn prefix() -> &'static str;

    fn from_config(config: &AppConfig) -> Result<Self, ConfigError>;
}

fn key(prefix: &str, name: &str) -> String {
    format!("{prefix}.{name}")
}

/// `server.*` keys.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub addr: String,
}

impl ConfigProperties for ServerConfig {
    fn prefix() -> &'static str {
        "server"
    }

    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let p = Self::prefix();
        Ok(ServerConfig {
            addr: config.get_or(&key(p, "addr"), "0.0.0.0:8000".to_string())?,
        })
    }
}

/// `database.*` keys.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://my_database.db`.
    pub url: String,
    pub max_connections: u32,
    /// Enforce `orders.user_id` / `orders.item_id` references.
    pub foreign_keys: bool,
    /// Create the database file when it does not exist yet.
    pub create_if_missing: bool,
}

impl ConfigProperties for DatabaseConfig {
    fn prefix() -> &'static str {
        "database"
    }

    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let p = Self::prefix();
        Ok(DatabaseConfig {
            url: config.get_or(&key(p, "url"), "sqlite://my_database.db".to_string())?,
            max_connections: config.get_or(&key(p, "max_connections"), 5u32)?,
            foreign_keys: config.get_or(&key(p, "foreign_keys"), false)?,
            create_if_missing: config.get_or(&key(p, "create_if_missing"), true)?,
        })
    }
}
