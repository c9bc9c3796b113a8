//! JWT claims carried by every bearer token.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token payload: who the bearer is and until when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the account id. Encoded as a JSON number.
    pub sub: u64,
    /// Expiration timestamp (seconds since epoch). Tokens without one
    /// never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Claims for `account_id` expiring `ttl` from now.
    pub fn for_account(account_id: u64, ttl: Duration) -> Self {
        Self {
            sub: account_id,
            exp: Some((Utc::now() + ttl).timestamp()),
        }
    }

    /// Returns the account id from the subject claim.
    pub fn account_id(&self) -> u64 {
        self.sub
    }
}
