use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::errors::SyncError;
use crate::helpers::fs::write_atomic;
use crate::observability::metrics::Metrics;

/// Writes row collections into the storage directory as JSON and CSV.
/// Each file is replaced whole; a failed write leaves the previous snapshot.
#[derive(Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    metrics: Arc<Metrics>,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>, metrics: Arc<Metrics>) -> Self {
        Self { dir: dir.into(), metrics }
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Write `<name>.json` then `<name>.csv`.
    pub async fn write_snapshot<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<(), SyncError> {
        self.write_json(&format!("{}.json", name), rows).await?;
        self.write_csv(&format!("{}.csv", name), rows).await?;
        Ok(())
    }

    /// Pretty-printed JSON array, keys in row field order.
    pub async fn write_json<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf, SyncError> {
        let path = self.path(file_name);
        let body = serde_json::to_vec_pretty(rows).map_err(|err| {
            SyncError::persistence(format!("Failed to encode JSON file: {}", path.display()), err)
        })?;
        self.persist(file_name, &path, &body).await?;
        Ok(path)
    }

    /// CSV with a header taken from the row fields. No rows gives an empty
    /// file without header. Booleans are written as `true`/`false`.
    pub async fn write_csv<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf, SyncError> {
        let path = self.path(file_name);
        let body = encode_csv(rows).map_err(|err| {
            SyncError::persistence(format!("Failed to encode CSV file: {}", path.display()), err)
        })?;
        self.persist(file_name, &path, &body).await?;
        Ok(path)
    }

    async fn persist(&self, file_name: &str, path: &Path, body: &[u8]) -> Result<(), SyncError> {
        match write_atomic(path, body, None).await {
            Ok(()) => {
                info!(path = %path.display(), bytes = body.len(), "snapshot written");
                self.metrics.snapshot_writes.with_label_values(&[file_name]).inc();
                Ok(())
            }
            Err(err) => {
                error!(path = %path.display(), "snapshot write failed: {}", err);
                self.metrics.snapshot_failures.with_label_values(&[file_name]).inc();
                Err(SyncError::persistence(
                    format!("Failed to write file: {}", path.display()),
                    err,
                ))
            }
        }
    }
}

fn encode_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
