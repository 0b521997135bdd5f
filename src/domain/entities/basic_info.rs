//! Plan basic info entity and repository trait.
//!
//! Maps to the `plan_basic_info` table (one optional row per plan).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Plan;
use crate::shared::error::AppError;

/// Descriptive trip metadata.
///
/// Maps to the `plan_basic_info` table:
/// - plan_id: UUID PRIMARY KEY REFERENCES plans(id)
/// - description: TEXT NULL
/// - location: VARCHAR(200) NULL
/// - destination: VARCHAR(200) NULL (mirrors plans.destination)
/// - start_date / end_date: DATE NULL
/// - trip_type_id: UUID NULL REFERENCES trip_types(id)
/// - cover_img_url: TEXT NULL (mirrors plans.cover_image_url)
/// - budget_amount: DOUBLE PRECISION NULL
/// - budget_currency: VARCHAR(3) NULL
/// - notes: TEXT NULL
/// - created_at_utc / updated_at_utc: TIMESTAMPTZ NOT NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBasicInfo {
    pub plan_id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub trip_type_id: Option<Uuid>,
    pub cover_img_url: Option<String>,
    pub budget_amount: Option<f64>,
    pub budget_currency: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanBasicInfo {
    /// An empty row for `plan_id`.
    pub fn empty(plan_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            plan_id,
            description: None,
            location: None,
            destination: None,
            start_date: None,
            end_date: None,
            trip_type_id: None,
            cover_img_url: None,
            budget_amount: None,
            budget_currency: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BasicInfoRepository: Send + Sync {
    async fn find_by_plan(&self, plan_id: Uuid) -> Result<Option<PlanBasicInfo>, AppError>;

    /// Write the plan's denormalised columns and upsert the info row in a
    /// single transaction.
    async fn save(&self, plan: &Plan, info: &PlanBasicInfo) -> Result<(), AppError>;
}
