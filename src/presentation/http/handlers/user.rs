//! User Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};

use crate::application::dto::response::ProfileResponse;
use crate::application::services::{UserService, UserServiceImpl};
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_service = UserServiceImpl::new(Arc::new(PgUserRepository::new(state.db.clone())));

    let profile = user_service.get_profile(auth.user_id).await?;

    Ok(Json(ProfileResponse::from(profile)))
}
