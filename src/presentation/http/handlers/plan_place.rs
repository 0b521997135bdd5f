//! Plan Place Handlers
//!
//! Places attached to a plan, as a flat list or as a tree.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::{CreatePlanPlaceRequest, UpdatePlanPlaceRequest};
use crate::application::dto::response::PlanPlaceResponse;
use crate::application::services::{PlanPlaceService, PlanPlaceServiceImpl};
use crate::infrastructure::repositories::{
    PgPlaceRepository, PgPlanPlaceRepository, PgPlanRepository,
};
use crate::presentation::http::extractors::ValidatedJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

type Service = PlanPlaceServiceImpl<PgPlanRepository, PgPlanPlaceRepository, PgPlaceRepository>;

fn plan_place_service(state: &AppState) -> Service {
    PlanPlaceServiceImpl::new(
        Arc::new(PgPlanRepository::new(state.db.clone())),
        Arc::new(PgPlanPlaceRepository::new(state.db.clone())),
        Arc::new(PgPlaceRepository::new(state.db.clone())),
    )
}

pub async fn list_plan_places(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Vec<PlanPlaceResponse>>, AppError> {
    let entries = plan_place_service(&state).list(plan_id, auth.user_id).await?;
    Ok(Json(entries.into_iter().map(PlanPlaceResponse::from).collect()))
}

pub async fn get_plan_place_tree(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Vec<PlanPlaceResponse>>, AppError> {
    let roots = plan_place_service(&state).tree(plan_id, auth.user_id).await?;
    Ok(Json(roots.into_iter().map(PlanPlaceResponse::from).collect()))
}

pub async fn get_plan_place(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<PlanPlaceResponse>, AppError> {
    let entry = plan_place_service(&state)
        .get(plan_id, id, auth.user_id)
        .await?;
    Ok(Json(PlanPlaceResponse::from(entry)))
}

pub async fn create_plan_place(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CreatePlanPlaceRequest>,
) -> Result<(StatusCode, Json<PlanPlaceResponse>), AppError> {
    let entry = plan_place_service(&state)
        .create(plan_id, auth.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(PlanPlaceResponse::from(entry))))
}

pub async fn update_plan_place(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
    ValidatedJson(body): ValidatedJson<UpdatePlanPlaceRequest>,
) -> Result<Json<PlanPlaceResponse>, AppError> {
    let entry = plan_place_service(&state)
        .update(plan_id, id, auth.user_id, body.into())
        .await?;
    Ok(Json(PlanPlaceResponse::from(entry)))
}

/// Removes the entry together with everything nested under it
pub async fn delete_plan_place(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    plan_place_service(&state)
        .delete(plan_id, id, auth.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
