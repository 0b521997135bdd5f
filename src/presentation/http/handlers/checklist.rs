//! Checklist Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::{CreateChecklistItemRequest, UpdateChecklistItemRequest};
use crate::application::dto::response::ChecklistItemResponse;
use crate::application::services::{ChecklistService, ChecklistServiceImpl};
use crate::infrastructure::repositories::{PgChecklistRepository, PgPlanRepository};
use crate::presentation::http::extractors::ValidatedJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn checklist_service(
    state: &AppState,
) -> ChecklistServiceImpl<PgPlanRepository, PgChecklistRepository> {
    ChecklistServiceImpl::new(
        Arc::new(PgPlanRepository::new(state.db.clone())),
        Arc::new(PgChecklistRepository::new(state.db.clone())),
    )
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Vec<ChecklistItemResponse>>, AppError> {
    let items = checklist_service(&state).list(plan_id, auth.user_id).await?;
    Ok(Json(items.into_iter().map(ChecklistItemResponse::from).collect()))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateChecklistItemRequest>,
) -> Result<(StatusCode, Json<ChecklistItemResponse>), AppError> {
    let item = checklist_service(&state)
        .create(plan_id, auth.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ChecklistItemResponse::from(item))))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
    ValidatedJson(body): ValidatedJson<UpdateChecklistItemRequest>,
) -> Result<Json<ChecklistItemResponse>, AppError> {
    let item = checklist_service(&state)
        .update(plan_id, id, auth.user_id, body.into())
        .await?;
    Ok(Json(ChecklistItemResponse::from(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    checklist_service(&state).delete(plan_id, id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
