use serde::{Deserialize, Serialize};

use crate::utils::constants::TOKEN_SKEW_SECONDS;

/// Cached access token. On disk the keys are `access_token` and `expires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    #[serde(rename = "expires", alias = "expires_at")]
    pub expires_at: u64, // UNIX TIMESTAMP
}

impl TokenRecord {
    pub fn new(access_token: String, expires_at: u64) -> Self {
        Self { access_token, expires_at }
    }

    /// True while the token is valid for at least the skew margin past `now`.
    pub fn is_usable(&self, now: u64) -> bool {
        self.expires_at > now.saturating_add(TOKEN_SKEW_SECONDS)
    }
}
