//! Account registration and credential checks.

use std::sync::Arc;

use tracing::{error, info, warn};

use picshare_auth::jwt::JwtEncoder;
use picshare_core::error::{AppError, ErrorKind};
use picshare_database::repositories::AccountRepository;
use picshare_entity::account::{Account, CreateAccount};

/// Message returned for any login that does not produce a token.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Handles registration and login.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Account repository.
    accounts: Arc<dyn AccountRepository>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(accounts: Arc<dyn AccountRepository>, encoder: Arc<JwtEncoder>) -> Self {
        Self { accounts, encoder }
    }

    /// Stores a new account with the given credentials.
    ///
    /// Usernames are not checked for uniqueness and the password is kept
    /// exactly as supplied.
    pub async fn register(&self, username: &str, password: &str) -> Result<Account, AppError> {
        let data = CreateAccount {
            username: username.to_string(),
            password: password.to_string(),
        };

        let account = self.accounts.create(&data).await.map_err(|e| {
            error!(username = %username, error = %e, "Failed to register user");
            AppError::with_source(ErrorKind::Database, "Failed to register user", e)
        })?;

        info!(account_id = account.id, username = %account.username, "User registered");
        Ok(account)
    }

    /// Checks credentials and issues a token for the matching account.
    ///
    /// An unknown username, a lookup failure, and a wrong password all
    /// produce the same credential error.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let account = match self.accounts.find_by_username(username).await {
            Ok(Some(account)) => account,
            Ok(None) => return Err(AppError::invalid_credentials(INVALID_CREDENTIALS)),
            Err(e) => {
                warn!(username = %username, error = %e, "Account lookup failed during login");
                return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
            }
        };

        if !account.password_matches(password) {
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let token = self.encoder.issue(account.id).map_err(|e| {
            error!(account_id = account.id, error = %e, "Failed to issue token");
            AppError::with_source(ErrorKind::Internal, "Error generating token", e)
        })?;

        info!(account_id = account.id, "User logged in");
        Ok(token)
    }
}
