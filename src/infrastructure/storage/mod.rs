//! Local Disk Storage
//!
//! Stores uploaded images under the configured upload directory. The same
//! directory is served statically by the HTTP layer.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{is_safe_file_name, FileStorage};
use crate::shared::error::AppError;

#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf, AppError> {
        if !is_safe_file_name(file_name) {
            return Err(AppError::BadRequest("Invalid file name".into()));
        }
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), AppError> {
        let path = self.path_for(file_name)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(file = %file_name, size = bytes.len(), "File stored");
        Ok(())
    }

    async fn delete(&self, file_name: &str) -> Result<bool, AppError> {
        let path = self.path_for(file_name)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
