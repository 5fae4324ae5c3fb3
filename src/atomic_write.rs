//! Whole-file replacement that never leaves a torn file behind.
//!
//! Contents go to a hidden sibling temp file, are fsynced, and then renamed
//! over the target. Readers see either the old or the new contents.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{Result, TodoError};

static NEXT_TEMP: AtomicU64 = AtomicU64::new(0);

/// Temp path next to `path`, unique per process and per call.
///
/// Format: `.{file_name}.{pid}.{n}.tmp`
pub(crate) fn temp_sibling(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let n = NEXT_TEMP.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), n))
}

/// Replace `path` with `contents` via a temp file in the same directory.
///
/// On failure the temp file is removed and `path` keeps its old contents.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = temp_sibling(path);

    if let Err(e) = write_synced(&temp_path, contents).await {
        discard(&temp_path).await;
        return Err(TodoError::write_failed(&temp_path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        discard(&temp_path).await;
        return Err(TodoError::write_failed(path, e));
    }

    Ok(())
}

async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

async fn discard(temp_path: &Path) {
    match fs::remove_file(temp_path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file"),
    }
}
