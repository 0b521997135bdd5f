//! Booking Service
//!
//! Reservations attached to a plan (flights, hotels, tickets). Owner only.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use super::plan_service::find_managed_plan;
use crate::domain::{Booking, BookingRepository, PlanRepository};
use crate::shared::error::AppError;

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn list(&self, plan_id: Uuid, user_id: Uuid) -> Result<Vec<Booking>, BookingError>;

    async fn get(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<Booking, BookingError>;

    async fn create(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        request: CreateBookingDto,
    ) -> Result<Booking, BookingError>;

    async fn update(
        &self,
        plan_id: Uuid,
        id: Uuid,
        user_id: Uuid,
        request: UpdateBookingDto,
    ) -> Result<Booking, BookingError>;

    async fn delete(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<(), BookingError>;
}

#[derive(Debug, Clone)]
pub struct CreateBookingDto {
    pub kind: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub amount: f64,
    pub currency: String,
    pub link_url: Option<String>,
    pub reservation_pdf: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBookingDto {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub link_url: Option<String>,
    pub reservation_pdf: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("You do not have access to this plan")]
    Forbidden,

    #[error("Booking not found")]
    NotFound,

    #[error("{0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Forbidden => AppError::Forbidden(err.to_string()),
            BookingError::NotFound => AppError::NotFound(err.to_string()),
            BookingError::Invalid(_) => AppError::BadRequest(err.to_string()),
            BookingError::Repository(e) => e,
        }
    }
}

pub struct BookingServiceImpl<P: PlanRepository, B: BookingRepository> {
    plan_repo: Arc<P>,
    booking_repo: Arc<B>,
}

impl<P: PlanRepository, B: BookingRepository> BookingServiceImpl<P, B> {
    pub fn new(plan_repo: Arc<P>, booking_repo: Arc<B>) -> Self {
        Self {
            plan_repo,
            booking_repo,
        }
    }

    async fn authorize(&self, plan_id: Uuid, user_id: Uuid) -> Result<(), BookingError> {
        find_managed_plan(&*self.plan_repo, plan_id, user_id)
            .await?
            .map(|_| ())
            .ok_or(BookingError::Forbidden)
    }
}

#[async_trait]
impl<P, B> BookingService for BookingServiceImpl<P, B>
where
    P: PlanRepository + 'static,
    B: BookingRepository + 'static,
{
    async fn list(&self, plan_id: Uuid, user_id: Uuid) -> Result<Vec<Booking>, BookingError> {
        self.authorize(plan_id, user_id).await?;
        Ok(self.booking_repo.list_by_plan(plan_id).await?)
    }

    async fn get(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<Booking, BookingError> {
        self.authorize(plan_id, user_id).await?;
        self.booking_repo
            .find_by_id(plan_id, id)
            .await?
            .ok_or(BookingError::NotFound)
    }

    async fn create(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        request: CreateBookingDto,
    ) -> Result<Booking, BookingError> {
        self.authorize(plan_id, user_id).await?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            plan_id,
            kind: request.kind,
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
            start_time: request.start_time,
            end_time: request.end_time,
            amount: request.amount,
            currency: request.currency.to_ascii_uppercase(),
            link_url: request.link_url,
            reservation_pdf: request.reservation_pdf,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        booking.check().map_err(BookingError::Invalid)?;

        let created = self.booking_repo.create(&booking).await?;
        tracing::info!(%plan_id, booking_id = %created.id, "Booking created");
        Ok(created)
    }

    async fn update(
        &self,
        plan_id: Uuid,
        id: Uuid,
        user_id: Uuid,
        request: UpdateBookingDto,
    ) -> Result<Booking, BookingError> {
        let mut booking = self.get(plan_id, id, user_id).await?;

        if let Some(kind) = request.kind {
            booking.kind = kind;
        }
        if let Some(name) = request.name {
            booking.name = name;
        }
        if let Some(start_date) = request.start_date {
            booking.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            booking.end_date = end_date;
        }
        if let Some(start_time) = request.start_time {
            booking.start_time = Some(start_time);
        }
        if let Some(end_time) = request.end_time {
            booking.end_time = Some(end_time);
        }
        if let Some(amount) = request.amount {
            booking.amount = amount;
        }
        if let Some(currency) = request.currency {
            booking.currency = currency.to_ascii_uppercase();
        }
        if let Some(link_url) = request.link_url {
            booking.link_url = Some(link_url);
        }
        if let Some(pdf) = request.reservation_pdf {
            booking.reservation_pdf = Some(pdf);
        }
        booking.check().map_err(BookingError::Invalid)?;
        booking.updated_at = Utc::now();

        self.booking_repo
            .update(&booking)
            .await?
            .ok_or(BookingError::NotFound)
    }

    async fn delete(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<(), BookingError> {
        self.authorize(plan_id, user_id).await?;

        if !self.booking_repo.soft_delete(plan_id, id).await? {
            return Err(BookingError::NotFound);
        }
        tracing::info!(%plan_id, booking_id = %id, "Booking deleted");
        Ok(())
    }
}
