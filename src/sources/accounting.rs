use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::token::TokenRecord;
use crate::errors::SyncError;

/// Upstream ledger account. Fields stay raw JSON and are cast during projection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(rename = "AccountID", default)]
    pub account_id: Value,
    #[serde(rename = "Code", default)]
    pub code: Value,
    #[serde(rename = "Name", default)]
    pub name: Value,
    #[serde(rename = "Type", default)]
    pub account_type: Value,
    #[serde(rename = "Class", default)]
    pub class: Value,
    #[serde(rename = "Status", default)]
    pub status: Value,
    #[serde(rename = "EnablePaymentsToAccount", default)]
    pub enable_payments_to_account: Value,
}

/// Upstream contact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(rename = "ContactID", default)]
    pub contact_id: Value,
    #[serde(rename = "Name", default)]
    pub name: Value,
    #[serde(rename = "EmailAddress", default)]
    pub email_address: Value,
    #[serde(rename = "IsSupplier", default)]
    pub is_supplier: Value,
    #[serde(rename = "IsCustomer", default)]
    pub is_customer: Value,
    #[serde(rename = "ContactStatus", default)]
    pub contact_status: Value,
}

#[derive(Debug, Deserialize)]
struct AccountsEnvelope {
    #[serde(rename = "Accounts", default)]
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct ContactsEnvelope {
    #[serde(rename = "Contacts", default)]
    contacts: Vec<Contact>,
}

/// Accounting API error bodies come in two shapes: validation errors carry
/// `Message`, problem documents carry `Title`/`Detail`.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "Detail")]
    detail: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
}

/// Read-only client for the accounting API of a single-tenant custom
/// connection: the tenant is implied by the token, no tenant header is sent.
#[derive(Debug, Clone)]
pub struct AccountingClient {
    base_url: String,
    client: Client,
}

impl AccountingClient {
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    pub async fn list_accounts(&self, token: &TokenRecord) -> Result<Vec<Account>, SyncError> {
        let envelope: AccountsEnvelope = self.get_collection("Accounts", &[], token).await?;
        Ok(envelope.accounts)
    }

    /// `filter` is passed through as the server-side `where` predicate.
    pub async fn list_contacts(
        &self,
        token: &TokenRecord,
        filter: &str,
    ) -> Result<Vec<Contact>, SyncError> {
        let envelope: ContactsEnvelope = self
            .get_collection("Contacts", &[("where", filter)], token)
            .await?;
        Ok(envelope.contacts)
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
        token: &TokenRecord,
    ) -> Result<T, SyncError> {
        let url = format!("{}/{}", self.base_url, resource);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|err| SyncError::fetch(transport_message(resource, &err), Some(Box::new(err))))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SyncError::fetch(transport_message(resource, &err), Some(Box::new(err))))?;
        debug!(resource, status = %status, bytes = body.len(), "accounting API responded");

        if !status.is_success() {
            return Err(SyncError::fetch(error_message(resource, status, &body), None));
        }
        serde_json::from_str(&body).map_err(|err| {
            SyncError::fetch(
                format!("Invalid {} response from accounting API: {}", resource, err),
                Some(Box::new(err)),
            )
        })
    }
}

fn error_message(resource: &str, status: StatusCode, body: &str) -> String {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    [parsed.message, parsed.detail, parsed.title]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!(
                "{} request failed with status {} {}",
                resource,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
            .trim_end()
            .to_owned()
        })
}

fn transport_message(resource: &str, err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("{} request timed out", resource)
    } else {
        format!("{} request failed: {}", resource, err)
    }
}
