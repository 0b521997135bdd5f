//! Checklist item entity and repository trait.
//!
//! Maps to the `plan_checklist_items` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Highest position a checklist item may take.
pub const MAX_CHECKLIST_POSITION: i32 = 1_000_000;

/// A to-do entry on a plan's packing / preparation list.
///
/// Maps to the `plan_checklist_items` table:
/// - id: UUID PRIMARY KEY
/// - plan_id: UUID NOT NULL REFERENCES plans(id)
/// - category: VARCHAR(100) NULL
/// - title: VARCHAR(200) NOT NULL
/// - is_done: BOOLEAN NOT NULL DEFAULT FALSE
/// - position: INTEGER NOT NULL
/// - note: TEXT NULL
/// - created_at_utc: TIMESTAMPTZ NOT NULL
/// - completed_at_utc: TIMESTAMPTZ NULL (set while is_done)
/// - deleted_at_utc: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub category: Option<String>,
    pub title: String,
    pub is_done: bool,
    pub position: i32,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ChecklistItem {
    /// Flip the done flag, keeping `completed_at` in step.
    ///
    /// Marking an already-done item done again keeps the original timestamp.
    pub fn set_done(&mut self, done: bool, now: DateTime<Utc>) {
        match (self.is_done, done) {
            (false, true) => self.completed_at = Some(now),
            (_, false) => self.completed_at = None,
            (true, true) => {}
        }
        self.is_done = done;
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// Items of a plan ordered by position, then creation time.
    async fn list_by_plan(&self, plan_id: Uuid) -> Result<Vec<ChecklistItem>, AppError>;

    async fn find_by_id(&self, plan_id: Uuid, id: Uuid) -> Result<Option<ChecklistItem>, AppError>;

    /// Position just after the last live item (0 for an empty list), never
    /// above `MAX_CHECKLIST_POSITION`.
    async fn next_position(&self, plan_id: Uuid) -> Result<i32, AppError>;

    async fn create(&self, item: &ChecklistItem) -> Result<ChecklistItem, AppError>;

    async fn update(&self, item: &ChecklistItem) -> Result<Option<ChecklistItem>, AppError>;

    async fn soft_delete(&self, plan_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}
