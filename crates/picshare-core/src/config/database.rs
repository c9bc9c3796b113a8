//! Database configuration.

use serde::{Deserialize, Serialize};

/// Which backend holds the account and image tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProvider {
    /// MySQL via sqlx.
    #[default]
    Mysql,
    /// Process-local tables; contents are lost on restart.
    Memory,
}

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Backend selection.
    #[serde(default)]
    pub provider: DatabaseProvider,
    /// MySQL server host.
    #[serde(default)]
    pub host: String,
    /// MySQL server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login user.
    #[serde(default)]
    pub user: String,
    /// Login password.
    #[serde(default)]
    pub password: String,
    /// Database (schema) name.
    #[serde(default)]
    pub name: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Create the database when the first connection attempt fails.
    #[serde(default = "default_true")]
    pub auto_create: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: DatabaseProvider::default(),
            host: String::new(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            name: String::new(),
            max_connections: default_max_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            auto_create: default_true(),
        }
    }
}

impl DatabaseConfig {
    /// Names of required connection fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("host", &self.host),
            ("user", &self.user),
            ("password", &self.password),
            ("name", &self.name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

fn default_port() -> u16 {
    3306
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}
