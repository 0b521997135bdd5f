//! Lookup Repository Implementation
//!
//! Reference tables seeded by migrations: `plan_statuses` and `trip_types`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{LookupRepository, PlanStatus, TripType};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct PlanStatusRow {
    id: i32,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct TripTypeRow {
    id: Uuid,
    name: String,
}

#[derive(Clone)]
pub struct PgLookupRepository {
    pool: PgPool,
}

impl PgLookupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LookupRepository for PgLookupRepository {
    async fn list_statuses(&self) -> Result<Vec<PlanStatus>, AppError> {
        let rows = sqlx::query_as::<_, PlanStatusRow>(
            "SELECT id, name FROM plan_statuses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PlanStatus {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn status_exists(&self, id: i32) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM plan_statuses WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_trip_types(&self) -> Result<Vec<TripType>, AppError> {
        let rows = sqlx::query_as::<_, TripTypeRow>(
            "SELECT id, name FROM trip_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| TripType {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn trip_type_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM trip_types WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
