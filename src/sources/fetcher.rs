use std::sync::Arc;

use tracing::{error, info};

use crate::errors::SyncError;
use crate::observability::metrics::Metrics;
use crate::parser::rows::{AccountRow, VendorRow};
use crate::sources::accounting::AccountingClient;
use crate::sources::authenticator::TokenAuthenticator;
use crate::utils::constants::{ACCOUNTS_SNAPSHOT, SUPPLIER_FILTER, VENDORS_SNAPSHOT};

/// Pulls accounts and supplier contacts and flattens them into rows.
pub struct ResourceFetcher {
    authenticator: Arc<TokenAuthenticator>,
    api: AccountingClient,
    metrics: Arc<Metrics>,
}

impl ResourceFetcher {
    pub fn new(
        authenticator: Arc<TokenAuthenticator>,
        api: AccountingClient,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { authenticator, api, metrics }
    }

    pub async fn get_accounts(&self) -> Result<Vec<AccountRow>, SyncError> {
        let result = async {
            let token = self.authenticator.get_token().await?;
            let accounts = self.api.list_accounts(&token).await?;
            Ok::<_, SyncError>(accounts.iter().map(AccountRow::from).collect::<Vec<_>>())
        }
        .await;
        self.record(ACCOUNTS_SNAPSHOT, result)
    }

    pub async fn get_vendors(&self) -> Result<Vec<VendorRow>, SyncError> {
        let result = async {
            let token = self.authenticator.get_token().await?;
            let contacts = self.api.list_contacts(&token, SUPPLIER_FILTER).await?;
            Ok::<_, SyncError>(contacts.iter().map(VendorRow::from).collect::<Vec<_>>())
        }
        .await;
        self.record(VENDORS_SNAPSHOT, result)
    }

    fn record<T>(&self, resource: &str, result: Result<Vec<T>, SyncError>) -> Result<Vec<T>, SyncError> {
        match &result {
            Ok(rows) => {
                info!(resource, rows = rows.len(), "fetched rows");
                self.metrics.sync_rows.with_label_values(&[resource]).inc_by(rows.len() as u64);
            }
            Err(err) => {
                error!(resource, kind = err.kind(), "fetch failed: {}", err);
                self.metrics.sync_failures.with_label_values(&[resource, err.kind()]).inc();
            }
        }
        result
    }
}
