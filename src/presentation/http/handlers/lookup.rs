//! Reference Data Handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::dto::response::{PlanStatusResponse, TripTypeResponse};
use crate::application::services::{LookupService, LookupServiceImpl};
use crate::infrastructure::repositories::PgLookupRepository;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn lookup_service(state: &AppState) -> LookupServiceImpl<PgLookupRepository> {
    LookupServiceImpl::new(Arc::new(PgLookupRepository::new(state.db.clone())))
}

pub async fn get_plan_statuses(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlanStatusResponse>>, AppError> {
    let statuses = lookup_service(&state).list_statuses().await?;
    Ok(Json(statuses.into_iter().map(PlanStatusResponse::from).collect()))
}

pub async fn get_trip_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<TripTypeResponse>>, AppError> {
    let trip_types = lookup_service(&state).list_trip_types().await?;
    Ok(Json(trip_types.into_iter().map(TripTypeResponse::from).collect()))
}
