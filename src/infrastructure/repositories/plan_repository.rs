//! Plan Repository Implementation
//!
//! PostgreSQL implementation of the PlanRepository trait. Every read joins
//! `plan_statuses` so plans carry their status name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Plan, PlanMember, PlanRepository, PlanRole};
use crate::shared::error::AppError;

/// Columns selected for a plan; the plan table is aliased `p`, statuses `s`.
const PLAN_COLUMNS: &str = r#"
    p.id, p.owner_id, p.title, p.destination, p.status_id, s.name AS status_name,
    p.is_public, p.cover_image_url, p.created_at_utc, p.updated_at_utc, p.deleted_at_utc
"#;

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    owner_id: Uuid,
    title: Option<String>,
    destination: Option<String>,
    status_id: i32,
    status_name: String,
    is_public: bool,
    cover_image_url: Option<String>,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
    deleted_at_utc: Option<DateTime<Utc>>,
}

impl PlanRow {
    fn into_plan(self) -> Plan {
        Plan {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            destination: self.destination,
            status_id: self.status_id,
            status_name: self.status_name,
            is_public: self.is_public,
            cover_image_url: self.cover_image_url,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
            deleted_at: self.deleted_at_utc,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlanMemberRow {
    plan_id: Uuid,
    user_id: Uuid,
    role: String,
    added_at_utc: DateTime<Utc>,
}

impl PlanMemberRow {
    fn into_member(self) -> PlanMember {
        PlanMember {
            plan_id: self.plan_id,
            user_id: self.user_id,
            role: PlanRole::from_str(&self.role),
            added_at: self.added_at_utc,
        }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::BadRequest("Plan references an unknown status or user".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL plan repository implementation.
#[derive(Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, AppError> {
        let sql = format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM plans p
            JOIN plan_statuses s ON s.id = p.status_id
            WHERE p.id = $1 AND p.deleted_at_utc IS NULL
            "#
        );

        let row = sqlx::query_as::<_, PlanRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_plan()))
    }

    async fn list_by_owner(&self, owner_id: Uuid, public_only: bool) -> Result<Vec<Plan>, AppError> {
        let sql = format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM plans p
            JOIN plan_statuses s ON s.id = p.status_id
            WHERE p.owner_id = $1
              AND p.deleted_at_utc IS NULL
              AND ($2 = FALSE OR p.is_public)
            ORDER BY p.created_at_utc DESC
            "#
        );

        let rows = sqlx::query_as::<_, PlanRow>(&sql)
            .bind(owner_id)
            .bind(public_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_plan()).collect())
    }

    async fn list_public(&self) -> Result<Vec<Plan>, AppError> {
        let sql = format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM plans p
            JOIN plan_statuses s ON s.id = p.status_id
            WHERE p.is_public AND p.deleted_at_utc IS NULL
            ORDER BY p.created_at_utc DESC
            "#
        );

        let rows = sqlx::query_as::<_, PlanRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_plan()).collect())
    }

    /// Insert the plan and its owner membership in one transaction.
    async fn create(&self, plan: &Plan) -> Result<Plan, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO plans (id, owner_id, title, destination, status_id, is_public,
                                   cover_image_url, created_at_utc, updated_at_utc)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
            )
            SELECT {PLAN_COLUMNS}
            FROM p
            JOIN plan_statuses s ON s.id = p.status_id
            "#
        );

        let row = sqlx::query_as::<_, PlanRow>(&sql)
            .bind(plan.id)
            .bind(plan.owner_id)
            .bind(&plan.title)
            .bind(&plan.destination)
            .bind(plan.status_id)
            .bind(plan.is_public)
            .bind(&plan.cover_image_url)
            .bind(plan.created_at)
            .bind(plan.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_write_error)?;

        sqlx::query(
            r#"
            INSERT INTO plan_members (plan_id, user_id, role, added_at_utc)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(plan.id)
        .bind(plan.owner_id)
        .bind(PlanRole::Owner.as_str())
        .bind(plan.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_plan())
    }

    async fn update(&self, plan: &Plan) -> Result<Option<Plan>, AppError> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE plans
                SET title = $2, destination = $3, status_id = $4, is_public = $5,
                    cover_image_url = $6, updated_at_utc = $7
                WHERE id = $1 AND deleted_at_utc IS NULL
                RETURNING *
            )
            SELECT {PLAN_COLUMNS}
            FROM p
            JOIN plan_statuses s ON s.id = p.status_id
            "#
        );

        let row = sqlx::query_as::<_, PlanRow>(&sql)
            .bind(plan.id)
            .bind(&plan.title)
            .bind(&plan.destination)
            .bind(plan.status_id)
            .bind(plan.is_public)
            .bind(&plan.cover_image_url)
            .bind(plan.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(row.map(|r| r.into_plan()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE plans
            SET deleted_at_utc = NOW(), updated_at_utc = NOW()
            WHERE id = $1 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_members(&self, plan_id: Uuid) -> Result<Vec<PlanMember>, AppError> {
        let rows = sqlx::query_as::<_, PlanMemberRow>(
            r#"
            SELECT plan_id, user_id, role, added_at_utc
            FROM plan_members
            WHERE plan_id = $1
            ORDER BY added_at_utc
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_member()).collect())
    }
}
