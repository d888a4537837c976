//! Local filesystem storage for the static build.
//!
//! Pages are written atomically (temp file, then rename) and skipped when
//! the file on disk already has the same content hash, so unchanged pages
//! keep their modification time.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{MANIFEST_KEY, Manifest, SiteStorage, WriteStatus, content_hash};

/// Filesystem-backed site output.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Full path for a relative key. Keys never escape the root.
    fn path(&self, key: &str) -> Result<PathBuf> {
        let key = key.trim_start_matches('/');
        if key.is_empty() || key.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(AppError::validation(format!("invalid output key '{key}'")));
        }
        Ok(self.root_dir.join(key))
    }

    async fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key)?;
        Self::ensure_dir(&path).await?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl SiteStorage for LocalStorage {
    async fn write_page(&self, key: &str, content: &[u8]) -> Result<WriteStatus> {
        if let Some(existing) = self.read_bytes(key).await? {
            if content_hash(&existing) == content_hash(content) {
                return Ok(WriteStatus::Unchanged);
            }
        }
        self.write_bytes(key, content).await?;
        log::debug!("Wrote {key} ({} bytes)", content.len());
        Ok(WriteStatus::Written)
    }

    async fn remove_page(&self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                log::debug!("Removed stale page {key}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn load_manifest(&self) -> Result<Option<Manifest>> {
        match self.read_bytes(MANIFEST_KEY).await? {
            Some(bytes) => match serde_json::from_slice(&bytes) {
                Ok(manifest) => Ok(Some(manifest)),
                Err(e) => {
                    log::warn!("Ignoring unreadable {MANIFEST_KEY}: {e}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn save_manifest(&self, manifest: &Manifest) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(manifest)?;
        self.write_bytes(MANIFEST_KEY, &bytes).await
    }
}
