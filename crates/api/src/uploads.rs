//! Local filesystem storage for uploaded point photos.
//!
//! Files are written under a single directory that is also served
//! statically at `/uploads`.

use std::io;
use std::path::{Path, PathBuf};

use ecoleta_core::media::{sanitize_filename, upload_filename};

/// Writes and removes uploaded images inside one directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Whether the storage directory exists and is a directory.
    pub async fn is_ready(&self) -> bool {
        tokio::fs::metadata(&self.dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    /// Store `data` under a freshly generated name derived from
    /// `original_name`. Returns the stored filename (not the full path).
    pub async fn save(&self, original_name: &str, data: &[u8]) -> io::Result<String> {
        self.ensure_dir().await?;

        let stored = upload_filename(original_name);
        tokio::fs::write(self.dir.join(&stored), data).await?;

        tracing::debug!(file = %stored, bytes = data.len(), "Upload stored");
        Ok(stored)
    }

    /// Delete a previously stored file. A missing file is not an error.
    pub async fn remove(&self, stored_name: &str) -> io::Result<()> {
        let path = self.dir.join(sanitize_filename(stored_name));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
