//! Booking Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Booking, BookingRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    plan_id: Uuid,
    kind: String,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    amount: f64,
    currency: String,
    link_url: Option<String>,
    reservation_pdf: Option<String>,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
    deleted_at_utc: Option<DateTime<Utc>>,
}

impl BookingRow {
    fn into_booking(self) -> Booking {
        Booking {
            id: self.id,
            plan_id: self.plan_id,
            kind: self.kind,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            amount: self.amount,
            currency: self.currency,
            link_url: self.link_url,
            reservation_pdf: self.reservation_pdf,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
            deleted_at: self.deleted_at_utc,
        }
    }
}

#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list_by_plan(&self, plan_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, plan_id, kind, name, start_date, end_date, start_time, end_time,
                   amount, currency, link_url, reservation_pdf,
                   created_at_utc, updated_at_utc, deleted_at_utc
            FROM plan_bookings
            WHERE plan_id = $1 AND deleted_at_utc IS NULL
            ORDER BY start_date, start_time NULLS FIRST, created_at_utc
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_booking()).collect())
    }

    async fn find_by_id(&self, plan_id: Uuid, id: Uuid) -> Result<Option<Booking>, AppError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, plan_id, kind, name, start_date, end_date, start_time, end_time,
                   amount, currency, link_url, reservation_pdf,
                   created_at_utc, updated_at_utc, deleted_at_utc
            FROM plan_bookings
            WHERE id = $1 AND plan_id = $2 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(id)
        .bind(plan_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_booking()))
    }

    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO plan_bookings (id, plan_id, kind, name, start_date, end_date,
                                       start_time, end_time, amount, currency, link_url,
                                       reservation_pdf, created_at_utc, updated_at_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, plan_id, kind, name, start_date, end_date, start_time, end_time,
                      amount, currency, link_url, reservation_pdf,
                      created_at_utc, updated_at_utc, deleted_at_utc
            "#,
        )
        .bind(booking.id)
        .bind(booking.plan_id)
        .bind(&booking.kind)
        .bind(&booking.name)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.amount)
        .bind(&booking.currency)
        .bind(&booking.link_url)
        .bind(&booking.reservation_pdf)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_booking())
    }

    async fn update(&self, booking: &Booking) -> Result<Option<Booking>, AppError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            UPDATE plan_bookings
            SET kind = $3, name = $4, start_date = $5, end_date = $6, start_time = $7,
                end_time = $8, amount = $9, currency = $10, link_url = $11,
                reservation_pdf = $12, updated_at_utc = $13
            WHERE id = $1 AND plan_id = $2 AND deleted_at_utc IS NULL
            RETURNING id, plan_id, kind, name, start_date, end_date, start_time, end_time,
                      amount, currency, link_url, reservation_pdf,
                      created_at_utc, updated_at_utc, deleted_at_utc
            "#,
        )
        .bind(booking.id)
        .bind(booking.plan_id)
        .bind(&booking.kind)
        .bind(&booking.name)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.amount)
        .bind(&booking.currency)
        .bind(&booking.link_url)
        .bind(&booking.reservation_pdf)
        .bind(booking.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_booking()))
    }

    async fn soft_delete(&self, plan_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE plan_bookings
            SET deleted_at_utc = NOW(), updated_at_utc = NOW()
            WHERE id = $1 AND plan_id = $2 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(id)
        .bind(plan_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
