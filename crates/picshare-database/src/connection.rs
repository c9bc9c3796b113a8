//! MySQL connection pool management.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;
use tracing::{info, warn};

use picshare_core::config::DatabaseConfig;
use picshare_core::error::{AppError, ErrorKind};

/// Wrapper around the sqlx MySQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database pool from configuration.
    ///
    /// When the first attempt fails and `auto_create` is enabled, the
    /// database is created on the server and the connection retried once.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            host = %config.host,
            port = config.port,
            user = %config.user,
            database = %config.name,
            max_connections = config.max_connections,
            "Connecting to MySQL"
        );

        let pool = match open_pool(config).await {
            Ok(pool) => pool,
            Err(e) if config.auto_create => {
                warn!(error = %e, database = %config.name, "Connection failed, trying to create database");
                create_database(config).await?;
                info!(database = %config.name, "Database created");
                open_pool(config).await.map_err(connect_error)?
            }
            Err(e) => return Err(connect_error(e)),
        };

        info!("Successfully connected to MySQL");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Connection options for the server, without selecting a database.
fn server_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .charset("utf8mb4")
}

async fn open_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(server_options(config).database(&config.name))
        .await
}

async fn create_database(config: &DatabaseConfig) -> Result<(), AppError> {
    let mut conn = MySqlConnection::connect_with(&server_options(config))
        .await
        .map_err(connect_error)?;

    let statement = format!(
        "CREATE DATABASE IF NOT EXISTS {}",
        quote_identifier(&config.name)
    );
    sqlx::query(&statement)
        .execute(&mut conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to create database '{}': {e}", config.name),
                e,
            )
        })?;

    conn.close().await.ok();
    Ok(())
}

fn connect_error(e: sqlx::Error) -> AppError {
    AppError::with_source(
        ErrorKind::Database,
        format!("Failed to connect to database: {e}"),
        e,
    )
}

/// Quote a MySQL identifier with backticks, doubling embedded backticks.
fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
