//! Plan Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::{CreatePlanRequest, UpdatePlanRequest};
use crate::application::dto::response::{OwnerCheckResponse, PlanMemberResponse, PlanResponse};
use crate::application::services::{PlanService, PlanServiceImpl};
use crate::domain::Plan;
use crate::infrastructure::repositories::{PgLookupRepository, PgPlanRepository, PgUserRepository};
use crate::presentation::http::extractors::{MaybeAuthUser, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

type Service = PlanServiceImpl<PgPlanRepository, PgLookupRepository, PgUserRepository>;

fn plan_service(state: &AppState) -> Service {
    PlanServiceImpl::new(
        Arc::new(PgPlanRepository::new(state.db.clone())),
        Arc::new(PgLookupRepository::new(state.db.clone())),
        Arc::new(PgUserRepository::new(state.db.clone())),
    )
}

fn to_responses(plans: Vec<Plan>) -> Json<Vec<PlanResponse>> {
    Json(plans.into_iter().map(PlanResponse::from).collect())
}

/// Plans of the caller
pub async fn get_my_plans(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<PlanResponse>>, AppError> {
    let plans = plan_service(&state).list_my_plans(auth.user_id).await?;
    Ok(to_responses(plans))
}

/// Plans of another user; private ones only for that user
pub async fn get_user_plans(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PlanResponse>>, AppError> {
    let plans = plan_service(&state).list_user_plans(user_id, viewer).await?;
    Ok(to_responses(plans))
}

pub async fn get_public_plans(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlanResponse>>, AppError> {
    let plans = plan_service(&state).list_public_plans().await?;
    Ok(to_responses(plans))
}

pub async fn get_plan(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<PlanResponse>, AppError> {
    let plan = plan_service(&state).get_plan(plan_id, viewer).await?;
    Ok(Json(PlanResponse::from(plan)))
}

/// Untitled private draft
pub async fn create_empty_plan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<(StatusCode, Json<PlanResponse>), AppError> {
    let plan = plan_service(&state).create_empty_plan(auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(PlanResponse::from(plan))))
}

pub async fn create_plan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreatePlanRequest>,
) -> Result<(StatusCode, Json<PlanResponse>), AppError> {
    let plan = plan_service(&state)
        .create_plan(auth.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(PlanResponse::from(plan))))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdatePlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let plan = plan_service(&state)
        .update_plan(plan_id, auth.user_id, body.into())
        .await?;
    Ok(Json(PlanResponse::from(plan)))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    plan_service(&state).delete_plan(plan_id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_owner(
    State(state): State<AppState>,
    Path((plan_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OwnerCheckResponse>, AppError> {
    let is_owner = plan_service(&state).is_plan_owner(plan_id, user_id).await?;
    Ok(Json(OwnerCheckResponse { is_owner }))
}

pub async fn get_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Vec<PlanMemberResponse>>, AppError> {
    let members = plan_service(&state)
        .list_members(plan_id, auth.user_id)
        .await?;
    Ok(Json(members.into_iter().map(PlanMemberResponse::from).collect()))
}
