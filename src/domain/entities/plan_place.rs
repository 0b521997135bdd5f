//! Plan place entity and repository trait.
//!
//! Maps to the `plan_places` table, the association attaching a place to a
//! plan with hierarchy metadata.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Subset of the attached place shown alongside each entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A place attached to a plan.
///
/// Maps to the `plan_places` table:
/// - id: UUID PRIMARY KEY
/// - plan_id: UUID NOT NULL REFERENCES plans(id)
/// - place_id: UUID NOT NULL REFERENCES places(id)
/// - name: VARCHAR(200) NULL (label override)
/// - kind: VARCHAR(50) NULL (e.g. country, city, place)
/// - level: INTEGER NOT NULL (depth hint, >= 0)
/// - parent_id: UUID NULL REFERENCES plan_places(id)
/// - created_at_utc / updated_at_utc: TIMESTAMPTZ NOT NULL
/// - deleted_at_utc: TIMESTAMPTZ NULL
///
/// `place` is joined from `places` on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPlace {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub place_id: Uuid,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub level: i32,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub place: Option<PlaceSummary>,
}

impl PlanPlace {
    pub fn new(
        plan_id: Uuid,
        place_id: Uuid,
        name: Option<String>,
        kind: Option<String>,
        level: i32,
        parent_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            plan_id,
            place_id,
            name,
            kind,
            level,
            parent_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            place: None,
        }
    }
}

/// Repository trait for plan places.
///
/// All reads are scoped to a plan and skip soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanPlaceRepository: Send + Sync {
    /// Entries of a plan ordered by level, then creation time.
    async fn list_by_plan(&self, plan_id: Uuid) -> Result<Vec<PlanPlace>, AppError>;

    async fn find_by_id(&self, plan_id: Uuid, id: Uuid) -> Result<Option<PlanPlace>, AppError>;

    async fn create(&self, entry: &PlanPlace) -> Result<PlanPlace, AppError>;

    /// Persist name, kind, level and parent. `None` when the entry is gone.
    async fn update(&self, entry: &PlanPlace) -> Result<Option<PlanPlace>, AppError>;

    /// Soft-delete an entry together with all of its descendants.
    /// Returns the number of rows marked deleted.
    async fn soft_delete_subtree(&self, plan_id: Uuid, id: Uuid) -> Result<u64, AppError>;
}
