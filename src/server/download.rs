use std::io::ErrorKind;

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::errors::SyncError;
use crate::server::routes::not_found;
use crate::server::server::AppState;

/// Snapshot files that may be downloaded, with their content types.
const DOWNLOADABLE: [(&str, &str); 4] = [
    ("accounts.json", "application/json"),
    ("accounts.csv", "text/csv; charset=utf-8"),
    ("vendors.json", "application/json"),
    ("vendors.csv", "text/csv; charset=utf-8"),
];

pub async fn download(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let Some((name, content_type)) = DOWNLOADABLE.iter().find(|(name, _)| *name == file) else {
        return not_found().await;
    };

    let path = state.snapshots.path(name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [
                (CONTENT_TYPE, content_type.to_string()),
                (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)),
            ],
            bytes,
        )
            .into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound => not_found().await,
        Err(err) => {
            SyncError::persistence(format!("Failed to read file: {}", path.display()), err)
                .into_response()
        }
    }
}
