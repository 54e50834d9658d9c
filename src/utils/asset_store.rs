use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Where uploaded employee images end up.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist `data` and return the name it was stored under.
    async fn store(&self, original_name: &str, data: &[u8]) -> AppResult<String>;

    /// Remove a previously stored asset.
    async fn remove(&self, stored_name: &str) -> AppResult<()>;
}

/// Keeps assets as plain files in one directory.
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Unique storage name: a v4 uuid followed by the client's file name with
/// any directory components and unusual characters stripped.
pub fn stored_file_name(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        format!("{}_{}", Uuid::new_v4(), cleaned)
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn store(&self, original_name: &str, data: &[u8]) -> AppResult<String> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(AppError::AssetPersistence)?;

        let name = stored_file_name(original_name);
        let path = self.root.join(&name);

        // create_new refuses to clobber an existing file
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(AppError::AssetPersistence)?;

        let written = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&path).await;
            return Err(AppError::AssetPersistence(e));
        }

        debug!(file = %name, bytes = data.len(), "Stored uploaded asset");
        Ok(name)
    }

    async fn remove(&self, stored_name: &str) -> AppResult<()> {
        let name = Path::new(stored_name)
            .file_name()
            .ok_or_else(|| {
                AppError::AssetPersistence(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "asset name has no file component",
                ))
            })?;

        fs::remove_file(self.root.join(name))
            .await
            .map_err(AppError::AssetPersistence)
    }
}
