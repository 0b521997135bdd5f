//! Plan entity, membership and repository trait.
//!
//! Maps to the `plans` and `plan_members` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PlanRole;
use crate::shared::error::AppError;

/// A trip plan owned by a user.
///
/// Maps to the `plans` table:
/// - id: UUID PRIMARY KEY
/// - owner_id: UUID NOT NULL REFERENCES users(id)
/// - title: VARCHAR(200) NULL
/// - destination: VARCHAR(200) NULL (mirrored in plan_basic_info)
/// - status_id: INTEGER NOT NULL REFERENCES plan_statuses(id)
/// - is_public: BOOLEAN NOT NULL DEFAULT FALSE
/// - cover_image_url: TEXT NULL
/// - created_at_utc / updated_at_utc: TIMESTAMPTZ NOT NULL
/// - deleted_at_utc: TIMESTAMPTZ NULL
///
/// `status_name` is joined from `plan_statuses` on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub destination: Option<String>,
    pub status_id: i32,
    pub status_name: String,
    pub is_public: bool,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Plan {
    /// Build a new plan owned by `owner_id`.
    pub fn new(owner_id: Uuid, title: Option<String>, status_id: i32, is_public: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            destination: None,
            status_id,
            status_name: String::new(),
            is_public,
            cover_image_url: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A user's membership on a plan.
///
/// Maps to the `plan_members` table, keyed by (plan_id, user_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMember {
    pub plan_id: Uuid,
    pub user_id: Uuid,
    pub role: PlanRole,
    pub added_at: DateTime<Utc>,
}

/// Repository trait for plans.
///
/// Reads never return soft-deleted plans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, AppError>;

    /// Plans of one owner, newest first. With `public_only` private plans are skipped.
    async fn list_by_owner(&self, owner_id: Uuid, public_only: bool) -> Result<Vec<Plan>, AppError>;

    /// All public plans, newest first.
    async fn list_public(&self) -> Result<Vec<Plan>, AppError>;

    /// Insert the plan and register its owner as an `Owner` member.
    async fn create(&self, plan: &Plan) -> Result<Plan, AppError>;

    /// Persist title, destination, status, visibility and cover.
    /// Returns `None` when the plan no longer exists.
    async fn update(&self, plan: &Plan) -> Result<Option<Plan>, AppError>;

    /// Set the deletion timestamp. Returns false when nothing was deleted.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_members(&self, plan_id: Uuid) -> Result<Vec<PlanMember>, AppError>;
}
