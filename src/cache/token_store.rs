use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::cache::token::TokenRecord;
use crate::errors::SyncError;
use crate::helpers::fs::write_atomic;

const TOKEN_FILE_MODE: u32 = 0o600;

/// Single-record, file-backed token cache.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable or unparsable files all mean "no token".
    pub async fn load(&self) -> Option<TokenRecord> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %self.path.display(), "no cached token: {}", err);
                return None;
            }
        };
        serde_json::from_slice::<TokenRecord>(&raw)
            .inspect_err(|err| {
                warn!(path = %self.path.display(), "ignoring unparsable token cache: {}", err)
            })
            .ok()
    }

    /// Overwrite the stored record.
    pub async fn save(&self, record: &TokenRecord) -> Result<(), SyncError> {
        let body = serde_json::to_vec_pretty(record)
            .map_err(|err| SyncError::persistence("Failed to encode token cache", err))?;
        write_atomic(&self.path, &body, Some(TOKEN_FILE_MODE))
            .await
            .map_err(|err| {
                SyncError::persistence(
                    format!("Failed to write token cache: {}", self.path.display()),
                    err,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_returns_none_for_missing_or_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens.json"));
        assert!(store.load().await.is_none());

        std::fs::write(store.path(), b"{not json").unwrap();
        assert!(store.load().await.is_none());

        std::fs::write(store.path(), b"").unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn save_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens.json"));

        store.save(&TokenRecord::new("first".into(), 100)).await.unwrap();
        store.save(&TokenRecord::new("second".into(), 200)).await.unwrap();

        assert_eq!(store.load().await, Some(TokenRecord::new("second".into(), 200)));
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n"), "token file should be pretty-printed");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn save_into_missing_directory_is_a_persistence_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("absent").join("tokens.json"));
        let err = store.save(&TokenRecord::new("t".into(), 1)).await.unwrap_err();
        assert!(matches!(err, SyncError::Persistence { .. }));
    }
}
