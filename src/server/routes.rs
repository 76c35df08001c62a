use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::SyncError;
use crate::parser::rows::{AccountRow, VendorRow};
use crate::server::server::AppState;
use crate::utils::constants::{ACCOUNTS_SNAPSHOT, VENDORS_SNAPSHOT};

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub configured: bool,
    pub connected: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse<T> {
    pub count: usize,
    pub rows: Vec<T>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Never fails: problems are reported through `error`.
pub async fn auth_status(State(state): State<AppState>) -> Json<AuthStatus> {
    let authenticator = &state.authenticator;
    if !authenticator.is_configured() {
        let missing = authenticator.missing_credentials();
        warn!(missing = ?missing, "credentials are not configured");
        return Json(AuthStatus {
            configured: false,
            connected: false,
            error: Some(SyncError::Configuration { missing }.to_string()),
        });
    }

    let (connected, error) = match authenticator.get_token().await {
        Ok(_) => (true, None),
        Err(err) => (false, Some(err.to_string())),
    };
    Json(AuthStatus { configured: true, connected, error })
}

pub async fn sync_accounts(
    State(state): State<AppState>,
) -> Result<Json<SyncResponse<AccountRow>>, SyncError> {
    let rows = state.fetcher.get_accounts().await?;
    state.snapshots.write_snapshot(ACCOUNTS_SNAPSHOT, &rows).await?;
    info!(count = rows.len(), "accounts synced");
    Ok(Json(SyncResponse { count: rows.len(), rows }))
}

pub async fn sync_vendors(
    State(state): State<AppState>,
) -> Result<Json<SyncResponse<VendorRow>>, SyncError> {
    let rows = state.fetcher.get_vendors().await?;
    state.snapshots.write_snapshot(VENDORS_SNAPSHOT, &rows).await?;
    info!(count = rows.len(), "vendors synced");
    Ok(Json(SyncResponse { count: rows.len(), rows }))
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
