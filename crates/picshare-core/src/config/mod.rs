//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus environment variables. Each sub-module
//! represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Environment variable prefix for layered overrides (`PICSHARE__SERVER__PORT`).
const ENV_PREFIX: &str = "PICSHARE";

/// Plain database variables honoured for compatibility with existing deployments.
const LEGACY_DB_VARS: [(&str, &str); 4] = [
    ("DB_HOST", "database.host"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
];

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Upload storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{env}.toml`, `PICSHARE__*` variables, then the plain
    /// `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` variables.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let legacy: Vec<(&str, Option<String>)> = LEGACY_DB_VARS
            .iter()
            .map(|(var, key)| (*key, std::env::var(var).ok().filter(|v| !v.is_empty())))
            .collect();

        Self::load_with_overrides(env, &legacy)
    }

    /// Load configuration with explicit key overrides applied last.
    pub fn load_with_overrides(
        env: &str,
        overrides: &[(&str, Option<String>)],
    ) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, value) in overrides {
            builder = builder.set_override_option(*key, value.clone())?;
        }

        let config = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check cross-field requirements that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.provider == DatabaseProvider::Mysql {
            let missing = self.database.missing_fields();
            if !missing.is_empty() {
                return Err(AppError::configuration(format!(
                    "Database settings are not set correctly (missing: {})",
                    missing.join(", ")
                )));
            }
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }

        if self.storage.upload_dir.trim().is_empty() {
            return Err(AppError::configuration(
                "storage.upload_dir must not be empty",
            ));
        }

        Ok(())
    }
}
