//! File Service
//!
//! Image uploads for plan covers and avatars.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::UploadSettings;
use crate::domain::{is_safe_file_name, FileStorage, StoredFile};
use crate::shared::error::AppError;

#[async_trait]
pub trait FileService: Send + Sync {
    async fn upload(&self, user_id: Uuid, file: UploadedFile) -> Result<StoredFile, FileError>;

    async fn delete(&self, user_id: Uuid, file_name: &str) -> Result<(), FileError>;
}

/// Raw multipart file as received.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub original_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("No file uploaded")]
    Empty,

    #[error("File size exceeds the maximum allowed size of {0} MB")]
    TooLarge(u64),

    #[error("File type not allowed. Allowed types: {0}")]
    ExtensionNotAllowed(String),

    #[error("Invalid file name")]
    InvalidName,

    #[error("File not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::NotFound => AppError::NotFound(err.to_string()),
            FileError::Repository(e) => e,
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

/// Lowercased extension with its leading dot, e.g. `.png`.
fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
}

pub struct FileServiceImpl<S: FileStorage> {
    storage: Arc<S>,
    settings: UploadSettings,
}

impl<S: FileStorage> FileServiceImpl<S> {
    pub fn new(storage: Arc<S>, settings: UploadSettings) -> Self {
        Self { storage, settings }
    }

    fn check(&self, file: &UploadedFile) -> Result<String, FileError> {
        if file.bytes.is_empty() {
            return Err(FileError::Empty);
        }
        if file.bytes.len() as u64 > self.settings.max_file_size {
            return Err(FileError::TooLarge(self.settings.max_file_size / (1024 * 1024)));
        }

        extension_of(file.original_name.as_deref().unwrap_or_default())
            .filter(|ext| self.settings.is_allowed_extension(ext))
            .ok_or_else(|| FileError::ExtensionNotAllowed(self.settings.allowed_extensions.join(", ")))
    }
}

#[async_trait]
impl<S: FileStorage + 'static> FileService for FileServiceImpl<S> {
    async fn upload(&self, user_id: Uuid, file: UploadedFile) -> Result<StoredFile, FileError> {
        let extension = self.check(&file)?;
        let file_name = format!("{}{}", Uuid::new_v4(), extension);

        self.storage.save(&file_name, &file.bytes).await?;

        tracing::info!(
            %user_id,
            file_name = %file_name,
            size = file.bytes.len(),
            "File uploaded"
        );

        Ok(StoredFile {
            file_url: self.settings.public_url(&file_name),
            file_size: file.bytes.len() as u64,
            content_type: file.content_type,
            file_name,
        })
    }

    async fn delete(&self, user_id: Uuid, file_name: &str) -> Result<(), FileError> {
        if !is_safe_file_name(file_name) {
            return Err(FileError::InvalidName);
        }
        if !self.storage.delete(file_name).await? {
            return Err(FileError::NotFound);
        }
        tracing::info!(%user_id, file_name, "File deleted");
        Ok(())
    }
}
