//! Account entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
///
/// The password is kept exactly as submitted at registration and compared
/// verbatim at login. It is never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// System-assigned identifier.
    pub id: u64,
    /// Login name. Not guaranteed unique.
    pub username: String,
    /// Plaintext password.
    #[serde(skip_serializing)]
    pub password: String,
}

impl Account {
    /// Compare a submitted password against the stored one.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Desired username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}
