//! Reference data: plan statuses and trip types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Maps to `plan_statuses` (id INTEGER, name VARCHAR(50)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStatus {
    pub id: i32,
    pub name: String,
}

/// Name of the status new empty plans start in.
pub const DEFAULT_STATUS_NAME: &str = "draft";

/// Maps to `trip_types` (id UUID, name VARCHAR(100)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripType {
    pub id: Uuid,
    pub name: String,
}

/// Pick the status a new plan should start in.
///
/// The status named "draft" (any case) wins, otherwise the lowest id.
pub fn default_status(statuses: &[PlanStatus]) -> Option<&PlanStatus> {
    statuses
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(DEFAULT_STATUS_NAME))
        .or_else(|| statuses.iter().min_by_key(|s| s.id))
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupRepository: Send + Sync {
    /// All statuses ordered by id.
    async fn list_statuses(&self) -> Result<Vec<PlanStatus>, AppError>;

    async fn status_exists(&self, id: i32) -> Result<bool, AppError>;

    /// All trip types ordered by name.
    async fn list_trip_types(&self) -> Result<Vec<TripType>, AppError>;

    async fn trip_type_exists(&self, id: Uuid) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: i32, name: &str) -> PlanStatus {
        PlanStatus {
            id,
            name: name.into(),
        }
    }

    #[test]
    fn draft_is_preferred_regardless_of_case() {
        let statuses = vec![status(1, "Active"), status(7, "DRAFT"), status(3, "Completed")];
        assert_eq!(default_status(&statuses).map(|s| s.id), Some(7));
    }

    #[test]
    fn falls_back_to_lowest_id() {
        let statuses = vec![status(5, "Active"), status(2, "Completed")];
        assert_eq!(default_status(&statuses).map(|s| s.id), Some(2));
    }

    #[test]
    fn none_without_statuses() {
        assert!(default_status(&[]).is_none());
    }
}
