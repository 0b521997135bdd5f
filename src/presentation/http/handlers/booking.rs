//! Booking Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::{CreateBookingRequest, UpdateBookingRequest};
use crate::application::dto::response::BookingResponse;
use crate::application::services::{BookingService, BookingServiceImpl};
use crate::infrastructure::repositories::{PgBookingRepository, PgPlanRepository};
use crate::presentation::http::extractors::ValidatedJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn booking_service(state: &AppState) -> BookingServiceImpl<PgPlanRepository, PgBookingRepository> {
    BookingServiceImpl::new(
        Arc::new(PgPlanRepository::new(state.db.clone())),
        Arc::new(PgBookingRepository::new(state.db.clone())),
    )
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = booking_service(&state).list(plan_id, auth.user_id).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service(&state).get(plan_id, id, auth.user_id).await?;
    Ok(Json(BookingResponse::from(booking)))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = booking_service(&state)
        .create(plan_id, auth.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
    ValidatedJson(body): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service(&state)
        .update(plan_id, id, auth.user_id, body.into())
        .await?;
    Ok(Json(BookingResponse::from(booking)))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((plan_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    booking_service(&state).delete(plan_id, id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
