//! File Upload Handlers

use axum::{
    extract::{Extension, Multipart, Path, State},
    Json,
};

use crate::application::dto::response::{FileUploadResponse, MessageResponse};
use crate::application::services::{FileService, FileServiceImpl, UploadedFile};
use crate::infrastructure::storage::LocalFileStorage;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

fn file_service(state: &AppState) -> FileServiceImpl<LocalFileStorage> {
    FileServiceImpl::new(state.storage.clone(), state.settings.uploads.clone())
}

/// First `file` field of the form; other fields are skipped.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        return Ok(UploadedFile {
            original_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    // Service reports the missing file
    Ok(UploadedFile::default())
}

pub async fn upload_file(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<FileUploadResponse>, AppError> {
    let file = read_file_field(&mut multipart).await?;
    let stored = file_service(&state).upload(auth.user_id, file).await?;

    Ok(Json(FileUploadResponse::from(stored)))
}

pub async fn delete_file(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(file_name): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    file_service(&state).delete(auth.user_id, &file_name).await?;

    Ok(Json(MessageResponse::new("File deleted successfully")))
}
