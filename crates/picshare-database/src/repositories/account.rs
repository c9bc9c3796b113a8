//! MySQL-backed account repository.

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use picshare_core::error::{AppError, ErrorKind};
use picshare_core::result::AppResult;
use picshare_entity::account::{Account, CreateAccount};

use super::AccountRepository;

/// Account repository over the `users` table.
#[derive(Debug, Clone)]
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new account repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(&data.username)
            .bind(&data.password)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create user", e))?;

        let id = result.last_insert_id();
        debug!(id, username = %data.username, "Inserted user");

        Ok(Account {
            id,
            username: data.username.clone(),
            password: data.password.clone(),
        })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT id, username, password FROM users WHERE username = ? ORDER BY id LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
        })
    }
}
