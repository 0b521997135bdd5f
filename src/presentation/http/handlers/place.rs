//! Place Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::{CreatePlaceRequest, UpdatePlaceRequest};
use crate::application::dto::response::PlaceResponse;
use crate::application::services::{PlaceService, PlaceServiceImpl};
use crate::infrastructure::repositories::PgPlaceRepository;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn place_service(state: &AppState) -> PlaceServiceImpl<PgPlaceRepository> {
    PlaceServiceImpl::new(Arc::new(PgPlaceRepository::new(state.db.clone())))
}

pub async fn list_places(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlaceResponse>>, AppError> {
    let places = place_service(&state).list_places().await?;
    Ok(Json(places.into_iter().map(PlaceResponse::from).collect()))
}

pub async fn get_place(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<PlaceResponse>, AppError> {
    let place = place_service(&state).get_place(place_id).await?;
    Ok(Json(PlaceResponse::from(place)))
}

pub async fn get_place_by_google_id(
    State(state): State<AppState>,
    Path(google_place_id): Path<String>,
) -> Result<Json<PlaceResponse>, AppError> {
    let place = place_service(&state)
        .get_by_google_place_id(&google_place_id)
        .await?;
    Ok(Json(PlaceResponse::from(place)))
}

pub async fn create_place(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<PlaceResponse>), AppError> {
    let place = place_service(&state).create_place(body.into()).await?;
    Ok((StatusCode::CREATED, Json(PlaceResponse::from(place))))
}

pub async fn update_place(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdatePlaceRequest>,
) -> Result<Json<PlaceResponse>, AppError> {
    let place = place_service(&state)
        .update_place(place_id, body.into())
        .await?;
    Ok(Json(PlaceResponse::from(place)))
}

pub async fn delete_place(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    place_service(&state).delete_place(place_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
