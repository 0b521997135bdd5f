//! Plan Basic Info Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::UpdateBasicInfoRequest;
use crate::application::dto::response::BasicInfoResponse;
use crate::application::services::{BasicInfoService, BasicInfoServiceImpl};
use crate::infrastructure::repositories::{
    PgBasicInfoRepository, PgLookupRepository, PgPlanRepository,
};
use crate::presentation::http::extractors::ValidatedJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

type Service = BasicInfoServiceImpl<PgPlanRepository, PgBasicInfoRepository, PgLookupRepository>;

fn basic_info_service(state: &AppState) -> Service {
    BasicInfoServiceImpl::new(
        Arc::new(PgPlanRepository::new(state.db.clone())),
        Arc::new(PgBasicInfoRepository::new(state.db.clone())),
        Arc::new(PgLookupRepository::new(state.db.clone())),
    )
}

pub async fn get_basic_info(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<BasicInfoResponse>, AppError> {
    let view = basic_info_service(&state).get(plan_id, auth.user_id).await?;
    Ok(Json(BasicInfoResponse::from(view)))
}

pub async fn update_basic_info(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateBasicInfoRequest>,
) -> Result<Json<BasicInfoResponse>, AppError> {
    let view = basic_info_service(&state)
        .update(plan_id, auth.user_id, body.into())
        .await?;
    Ok(Json(BasicInfoResponse::from(view)))
}
