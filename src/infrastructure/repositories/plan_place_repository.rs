//! Plan Place Repository Implementation
//!
//! PostgreSQL implementation of the PlanPlaceRepository trait. Entries are
//! read together with a summary of the attached place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{PlaceSummary, PlanPlace, PlanPlaceRepository};
use crate::shared::error::AppError;

/// Entry columns (`pp`) plus the joined place (`pl`).
const ENTRY_SELECT: &str = r#"
    SELECT pp.id, pp.plan_id, pp.place_id, pp.name, pp.kind, pp.level, pp.parent_id,
           pp.created_at_utc, pp.updated_at_utc, pp.deleted_at_utc,
           pl.name AS place_name, pl.address AS place_address,
           pl.image_url AS place_image_url, pl.lat AS place_lat, pl.lng AS place_lng
    FROM plan_places pp
    LEFT JOIN places pl ON pl.id = pp.place_id AND pl.deleted_at_utc IS NULL
"#;

#[derive(Debug, sqlx::FromRow)]
struct PlanPlaceRow {
    id: Uuid,
    plan_id: Uuid,
    place_id: Uuid,
    name: Option<String>,
    kind: Option<String>,
    level: i32,
    parent_id: Option<Uuid>,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
    deleted_at_utc: Option<DateTime<Utc>>,
    place_name: Option<String>,
    place_address: Option<String>,
    place_image_url: Option<String>,
    place_lat: Option<f64>,
    place_lng: Option<f64>,
}

impl PlanPlaceRow {
    fn into_plan_place(self) -> PlanPlace {
        // A missing name means the join found no live place
        let place = self.place_name.map(|name| PlaceSummary {
            id: self.place_id,
            name,
            address: self.place_address,
            image_url: self.place_image_url,
            lat: self.place_lat,
            lng: self.place_lng,
        });

        PlanPlace {
            id: self.id,
            plan_id: self.plan_id,
            place_id: self.place_id,
            name: self.name,
            kind: self.kind,
            level: self.level,
            parent_id: self.parent_id,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
            deleted_at: self.deleted_at_utc,
            place,
        }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::BadRequest("Plan place references an unknown place or parent".to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            AppError::BadRequest("Level must be a non-negative number".to_string())
        }
        _ => AppError::Database(e),
    }
}

#[derive(Clone)]
pub struct PgPlanPlaceRepository {
    pool: PgPool,
}

impl PgPlanPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn reload(&self, plan_id: Uuid, id: Uuid) -> Result<PlanPlace, AppError> {
        self.find_by_id(plan_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Plan place {} vanished after write", id)))
    }
}

#[async_trait]
impl PlanPlaceRepository for PgPlanPlaceRepository {
    async fn list_by_plan(&self, plan_id: Uuid) -> Result<Vec<PlanPlace>, AppError> {
        let sql = format!(
            "{ENTRY_SELECT} WHERE pp.plan_id = $1 AND pp.deleted_at_utc IS NULL \
             ORDER BY pp.level, pp.created_at_utc"
        );

        let rows = sqlx::query_as::<_, PlanPlaceRow>(&sql)
            .bind(plan_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_plan_place()).collect())
    }

    async fn find_by_id(&self, plan_id: Uuid, id: Uuid) -> Result<Option<PlanPlace>, AppError> {
        let sql = format!(
            "{ENTRY_SELECT} WHERE pp.id = $1 AND pp.plan_id = $2 AND pp.deleted_at_utc IS NULL"
        );

        let row = sqlx::query_as::<_, PlanPlaceRow>(&sql)
            .bind(id)
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_plan_place()))
    }

    async fn create(&self, entry: &PlanPlace) -> Result<PlanPlace, AppError> {
        sqlx::query(
            r#"
            INSERT INTO plan_places (id, plan_id, place_id, name, kind, level, parent_id,
                                     created_at_utc, updated_at_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id)
        .bind(entry.plan_id)
        .bind(entry.place_id)
        .bind(&entry.name)
        .bind(&entry.kind)
        .bind(entry.level)
        .bind(entry.parent_id)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        self.reload(entry.plan_id, entry.id).await
    }

    async fn update(&self, entry: &PlanPlace) -> Result<Option<PlanPlace>, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE plan_places
            SET name = $3, kind = $4, level = $5, parent_id = $6, updated_at_utc = $7
            WHERE id = $1 AND plan_id = $2 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(entry.id)
        .bind(entry.plan_id)
        .bind(&entry.name)
        .bind(&entry.kind)
        .bind(entry.level)
        .bind(entry.parent_id)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.reload(entry.plan_id, entry.id).await.map(Some)
    }

    /// `UNION` (not `UNION ALL`) stops the walk on corrupted cyclic data.
    async fn soft_delete_subtree(&self, plan_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            WITH RECURSIVE subtree AS (
                SELECT id FROM plan_places
                WHERE id = $2 AND plan_id = $1 AND deleted_at_utc IS NULL
                UNION
                SELECT c.id FROM plan_places c
                JOIN subtree s ON c.parent_id = s.id
                WHERE c.plan_id = $1 AND c.deleted_at_utc IS NULL
            )
            UPDATE plan_places
            SET deleted_at_utc = NOW(), updated_at_utc = NOW()
            WHERE id IN (SELECT id FROM subtree)
            "#,
        )
        .bind(plan_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
