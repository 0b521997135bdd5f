//! Checklist Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{ChecklistItem, ChecklistRepository, MAX_CHECKLIST_POSITION};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ChecklistItemRow {
    id: Uuid,
    plan_id: Uuid,
    category: Option<String>,
    title: String,
    is_done: bool,
    position: i32,
    note: Option<String>,
    created_at_utc: DateTime<Utc>,
    completed_at_utc: Option<DateTime<Utc>>,
    deleted_at_utc: Option<DateTime<Utc>>,
}

impl ChecklistItemRow {
    fn into_item(self) -> ChecklistItem {
        ChecklistItem {
            id: self.id,
            plan_id: self.plan_id,
            category: self.category,
            title: self.title,
            is_done: self.is_done,
            position: self.position,
            note: self.note,
            created_at: self.created_at_utc,
            completed_at: self.completed_at_utc,
            deleted_at: self.deleted_at_utc,
        }
    }
}

#[derive(Clone)]
pub struct PgChecklistRepository {
    pool: PgPool,
}

impl PgChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChecklistRepository for PgChecklistRepository {
    async fn list_by_plan(&self, plan_id: Uuid) -> Result<Vec<ChecklistItem>, AppError> {
        let rows = sqlx::query_as::<_, ChecklistItemRow>(
            r#"
            SELECT id, plan_id, category, title, is_done, position, note,
                   created_at_utc, completed_at_utc, deleted_at_utc
            FROM plan_checklist_items
            WHERE plan_id = $1 AND deleted_at_utc IS NULL
            ORDER BY position, created_at_utc
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_item()).collect())
    }

    async fn find_by_id(&self, plan_id: Uuid, id: Uuid) -> Result<Option<ChecklistItem>, AppError> {
        let row = sqlx::query_as::<_, ChecklistItemRow>(
            r#"
            SELECT id, plan_id, category, title, is_done, position, note,
                   created_at_utc, completed_at_utc, deleted_at_utc
            FROM plan_checklist_items
            WHERE id = $1 AND plan_id = $2 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(id)
        .bind(plan_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_item()))
    }

    /// Clamped to [`MAX_CHECKLIST_POSITION`]; the sum is taken as BIGINT.
    async fn next_position(&self, plan_id: Uuid) -> Result<i32, AppError> {
        let next: i32 = sqlx::query_scalar(
            r#"
            SELECT LEAST(COALESCE(MAX(position)::BIGINT + 1, 0), $2)::INTEGER
            FROM plan_checklist_items
            WHERE plan_id = $1 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(plan_id)
        .bind(i64::from(MAX_CHECKLIST_POSITION))
        .fetch_one(&self.pool)
        .await?;

        Ok(next)
    }

    async fn create(&self, item: &ChecklistItem) -> Result<ChecklistItem, AppError> {
        let row = sqlx::query_as::<_, ChecklistItemRow>(
            r#"
            INSERT INTO plan_checklist_items (id, plan_id, category, title, is_done, position,
                                              note, created_at_utc, completed_at_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, plan_id, category, title, is_done, position, note,
                      created_at_utc, completed_at_utc, deleted_at_utc
            "#,
        )
        .bind(item.id)
        .bind(item.plan_id)
        .bind(&item.category)
        .bind(&item.title)
        .bind(item.is_done)
        .bind(item.position)
        .bind(&item.note)
        .bind(item.created_at)
        .bind(item.completed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_item())
    }

    async fn update(&self, item: &ChecklistItem) -> Result<Option<ChecklistItem>, AppError> {
        let row = sqlx::query_as::<_, ChecklistItemRow>(
            r#"
            UPDATE plan_checklist_items
            SET category = $3, title = $4, is_done = $5, position = $6, note = $7,
                completed_at_utc = $8
            WHERE id = $1 AND plan_id = $2 AND deleted_at_utc IS NULL
            RETURNING id, plan_id, category, title, is_done, position, note,
                      created_at_utc, completed_at_utc, deleted_at_utc
            "#,
        )
        .bind(item.id)
        .bind(item.plan_id)
        .bind(&item.category)
        .bind(&item.title)
        .bind(item.is_done)
        .bind(item.position)
        .bind(&item.note)
        .bind(item.completed_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_item()))
    }

    async fn soft_delete(&self, plan_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE plan_checklist_items
            SET deleted_at_utc = NOW()
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
