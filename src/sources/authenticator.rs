use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::cache::token::TokenRecord;
use crate::cache::token_store::TokenStore;
use crate::config::credentials::Credentials;
use crate::errors::SyncError;
use crate::helpers::time::now_u64;
use crate::observability::metrics::Metrics;
use crate::sources::oauth2::OAuth2Source;

/// Hands out a usable access token, exchanging credentials only when the
/// cached one is missing or inside the skew margin.
///
/// Concurrent callers that all see an expired cache each refresh; the store
/// keeps whichever write lands last.
pub struct TokenAuthenticator {
    credentials: Credentials,
    store: TokenStore,
    endpoint: OAuth2Source,
    metrics: Arc<Metrics>,
}

impl TokenAuthenticator {
    pub fn new(
        credentials: Credentials,
        store: TokenStore,
        endpoint: OAuth2Source,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { credentials, store, endpoint, metrics }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    pub fn missing_credentials(&self) -> Vec<&'static str> {
        self.credentials.missing()
    }

    pub async fn get_token(&self) -> Result<TokenRecord, SyncError> {
        self.get_token_at(now_u64()).await
    }

    /// Same as [`get_token`](Self::get_token) with an explicit clock.
    pub async fn get_token_at(&self, now: u64) -> Result<TokenRecord, SyncError> {
        let (Some(client_id), Some(client_secret)) =
            (self.credentials.client_id(), self.credentials.client_secret())
        else {
            return Err(SyncError::Configuration { missing: self.credentials.missing() });
        };

        if let Some(record) = self.store.load().await.filter(|record| record.is_usable(now)) {
            debug!(expires_at = record.expires_at, "using cached access token");
            self.metrics.token_cache_hits.inc();
            return Ok(record);
        }

        info!("Fetching new client_credentials access token");
        self.metrics.token_requests.inc();
        let start = Instant::now();
        let result = self
            .endpoint
            .exchange(client_id, client_secret, self.credentials.scopes(), now)
            .await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        self.metrics
            .token_fetch_duration
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        let record = result.inspect_err(|err| {
            let cause = std::error::Error::source(err).map(|c| c.to_string());
            error!(cause = ?cause, "Failed to get access token: {}", err);
            self.metrics.token_failures.with_label_values(&[err.kind()]).inc();
        })?;

        self.store.save(&record).await.inspect_err(|err| {
            error!("Failed to persist access token: {}", err);
            self.metrics.token_failures.with_label_values(&[err.kind()]).inc();
        })?;
        info!(expires_at = record.expires_at, "Successfully obtained access token");
        Ok(record)
    }
}
