//! Basic Info Repository Implementation
//!
//! The `plan_basic_info` row is written together with the plan columns it
//! mirrors, inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{BasicInfoRepository, Plan, PlanBasicInfo};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct BasicInfoRow {
    plan_id: Uuid,
    description: Option<String>,
    location: Option<String>,
    destination: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    trip_type_id: Option<Uuid>,
    cover_img_url: Option<String>,
    budget_amount: Option<f64>,
    budget_currency: Option<String>,
    notes: Option<String>,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
}

impl BasicInfoRow {
    fn into_info(self) -> PlanBasicInfo {
        PlanBasicInfo {
            plan_id: self.plan_id,
            description: self.description,
            location: self.location,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            trip_type_id: self.trip_type_id,
            cover_img_url: self.cover_img_url,
            budget_amount: self.budget_amount,
            budget_currency: self.budget_currency,
            notes: self.notes,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
        }
    }
}

#[derive(Clone)]
pub struct PgBasicInfoRepository {
    pool: PgPool,
}

impl PgBasicInfoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasicInfoRepository for PgBasicInfoRepository {
    async fn find_by_plan(&self, plan_id: Uuid) -> Result<Option<PlanBasicInfo>, AppError> {
        let row = sqlx::query_as::<_, BasicInfoRow>(
            r#"
            SELECT plan_id, description, location, destination, start_date, end_date,
                   trip_type_id, cover_img_url, budget_amount, budget_currency, notes,
                   created_at_utc, updated_at_utc
            FROM plan_basic_info
            WHERE plan_id = $1
            "#,
        )
        .bind(plan_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_info()))
    }

    async fn save(&self, plan: &Plan, info: &PlanBasicInfo) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE plans
            SET title = $2, destination = $3, cover_image_url = $4, updated_at_utc = $5
            WHERE id = $1 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(plan.id)
        .bind(&plan.title)
        .bind(&plan.destination)
        .bind(&plan.cover_image_url)
        .bind(plan.updated_at)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Plan not found".to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO plan_basic_info (plan_id, description, location, destination,
                                         start_date, end_date, trip_type_id, cover_img_url,
                                         budget_amount, budget_currency, notes,
                                         created_at_utc, updated_at_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (plan_id) DO UPDATE SET
                description = EXCLUDED.description,
                location = EXCLUDED.location,
                destination = EXCLUDED.destination,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                trip_type_id = EXCLUDED.trip_type_id,
                cover_img_url = EXCLUDED.cover_img_url,
                budget_amount = EXCLUDED.budget_amount,
                budget_currency = EXCLUDED.budget_currency,
                notes = EXCLUDED.notes,
                updated_at_utc = EXCLUDED.updated_at_utc
            "#,
        )
        .bind(info.plan_id)
        .bind(&info.description)
        .bind(&info.location)
        .bind(&info.destination)
        .bind(info.start_date)
        .bind(info.end_date)
        .bind(info.trip_type_id)
        .bind(&info.cover_img_url)
        .bind(info.budget_amount)
        .bind(&info.budget_currency)
        .bind(&info.notes)
        .bind(info.created_at)
        .bind(info.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest("Trip type does not exist".to_string())
            }
            _ => AppError::Database(e),
        })?;

        tx.commit().await?;
        Ok(())
    }
}
