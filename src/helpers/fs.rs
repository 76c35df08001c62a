use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Write `content` to `path` through a sibling temp file and a rename, so a
/// reader sees either the previous file or the complete new one.
pub async fn write_atomic(path: &Path, content: &[u8], mode: Option<u32>) -> io::Result<()> {
    let tmp = tmp_path(path);
    if let Err(err) = write_tmp(&tmp, content, mode).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err);
    }
    fs::rename(&tmp, path).await.inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp);
    })
}

async fn write_tmp(tmp: &Path, content: &[u8], mode: Option<u32>) -> io::Result<()> {
    fs::write(tmp, content).await?;
    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp, std::fs::Permissions::from_mode(mode)).await?;
    }
    #[cfg(not(unix))]
    let _ = mode;
    Ok(())
}

/// Unique per call, so concurrent writers of one target never share a temp file.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}.{}.tmp", std::process::id(), seq));
    path.with_file_name(name)
}
