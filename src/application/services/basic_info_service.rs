//! Basic Info Service
//!
//! Reads and updates the descriptive part of a plan, which is split between
//! the `plans` row and its `plan_basic_info` row.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::plan_service::find_managed_plan;
use crate::domain::services::{BasicInfoSync, BasicInfoUpdate};
use crate::domain::{BasicInfoRepository, LookupRepository, Plan, PlanBasicInfo, PlanRepository};
use crate::shared::error::AppError;

/// A plan together with its (possibly absent) basic info row.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfoView {
    pub plan: Plan,
    pub info: Option<PlanBasicInfo>,
}

#[async_trait]
pub trait BasicInfoService: Send + Sync {
    async fn get(&self, plan_id: Uuid, user_id: Uuid) -> Result<BasicInfoView, BasicInfoError>;

    async fn update(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        update: BasicInfoUpdate,
    ) -> Result<BasicInfoView, BasicInfoError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BasicInfoError {
    #[error("You do not have access to this plan")]
    Forbidden,

    #[error("Trip type with ID {0} does not exist")]
    InvalidTripType(Uuid),

    #[error("{0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<BasicInfoError> for AppError {
    fn from(err: BasicInfoError) -> Self {
        match err {
            BasicInfoError::Forbidden => AppError::Forbidden(err.to_string()),
            BasicInfoError::InvalidTripType(_) | BasicInfoError::Invalid(_) => {
                AppError::BadRequest(err.to_string())
            }
            BasicInfoError::Repository(e) => e,
        }
    }
}

pub struct BasicInfoServiceImpl<P, B, L>
where
    P: PlanRepository,
    B: BasicInfoRepository,
    L: LookupRepository,
{
    plan_repo: Arc<P>,
    info_repo: Arc<B>,
    lookup_repo: Arc<L>,
}

impl<P, B, L> BasicInfoServiceImpl<P, B, L>
where
    P: PlanRepository,
    B: BasicInfoRepository,
    L: LookupRepository,
{
    pub fn new(plan_repo: Arc<P>, info_repo: Arc<B>, lookup_repo: Arc<L>) -> Self {
        Self {
            plan_repo,
            info_repo,
            lookup_repo,
        }
    }
}

#[async_trait]
impl<P, B, L> BasicInfoService for BasicInfoServiceImpl<P, B, L>
where
    P: PlanRepository + 'static,
    B: BasicInfoRepository + 'static,
    L: LookupRepository + 'static,
{
    /// A missing plan is reported like a foreign one.
    async fn get(&self, plan_id: Uuid, user_id: Uuid) -> Result<BasicInfoView, BasicInfoError> {
        let plan = find_managed_plan(&*self.plan_repo, plan_id, user_id)
            .await?
            .ok_or(BasicInfoError::Forbidden)?;

        let info = self.info_repo.find_by_plan(plan_id).await?;
        Ok(BasicInfoView { plan, info })
    }

    async fn update(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        update: BasicInfoUpdate,
    ) -> Result<BasicInfoView, BasicInfoError> {
        let mut plan = find_managed_plan(&*self.plan_repo, plan_id, user_id)
            .await?
            .ok_or(BasicInfoError::Forbidden)?;

        if let Some(trip_type_id) = update.trip_type.target() {
            if !self.lookup_repo.trip_type_exists(trip_type_id).await? {
                return Err(BasicInfoError::InvalidTripType(trip_type_id));
            }
        }

        let existing = self.info_repo.find_by_plan(plan_id).await?;
        let info = BasicInfoSync::apply(&mut plan, existing, update, Utc::now())
            .map_err(BasicInfoError::Invalid)?;

        self.info_repo.save(&plan, &info).await?;
        tracing::info!(%plan_id, %user_id, "Plan basic info updated");

        self.get(plan_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MockBasicInfoRepository, MockLookupRepository, MockPlanRepository, ReferenceUpdate,
    };
    use chrono::NaiveDate;

    type Service =
        BasicInfoServiceImpl<MockPlanRepository, MockBasicInfoRepository, MockLookupRepository>;

    fn service(
        plans: MockPlanRepository,
        infos: MockBasicInfoRepository,
        lookups: MockLookupRepository,
    ) -> Service {
        BasicInfoServiceImpl::new(Arc::new(plans), Arc::new(infos), Arc::new(lookups))
    }

    fn plans_returning(plan: Plan) -> MockPlanRepository {
        let mut plans = MockPlanRepository::new();
        plans
            .expect_find_by_id()
            .returning(move |_| Ok(Some(plan.clone())));
        plans
    }

    #[tokio::test]
    async fn get_without_row_returns_plan_only() {
        let owner = Uuid::new_v4();
        let plan = Plan::new(owner, Some("Trip".into()), 1, false);
        let plan_id = plan.id;
        let mut infos = MockBasicInfoRepository::new();
        infos.expect_find_by_plan().returning(|_| Ok(None));

        let view = service(plans_returning(plan), infos, MockLookupRepository::new())
            .get(plan_id, owner)
            .await
            .unwrap();

        assert_eq!(view.plan.title.as_deref(), Some("Trip"));
        assert!(view.info.is_none());
    }

    #[tokio::test]
    async fn missing_plan_is_forbidden_on_read_and_write() {
        let mut plans = MockPlanRepository::new();
        plans.expect_find_by_id().returning(|_| Ok(None));
        let mut infos = MockBasicInfoRepository::new();
        infos.expect_save().never();
        let svc = service(plans, infos, MockLookupRepository::new());

        let read = svc.get(Uuid::new_v4(), Uuid::new_v4()).await;
        let write = svc
            .update(Uuid::new_v4(), Uuid::new_v4(), BasicInfoUpdate::default())
            .await;

        assert!(matches!(read, Err(BasicInfoError::Forbidden)));
        assert!(matches!(write, Err(BasicInfoError::Forbidden)));
        assert!(matches!(
            AppError::from(BasicInfoError::Forbidden),
            AppError::Forbidden(_)
        ));
    }

    #[tokio::test]
    async fn update_rejects_unknown_trip_type() {
        let owner = Uuid::new_v4();
        let plan = Plan::new(owner, None, 1, false);
        let plan_id = plan.id;
        let mut lookups = MockLookupRepository::new();
        lookups.expect_trip_type_exists().returning(|_| Ok(false));
        let mut infos = MockBasicInfoRepository::new();
        infos.expect_save().never();

        let result = service(plans_returning(plan), infos, lookups)
            .update(
                plan_id,
                owner,
                BasicInfoUpdate {
                    trip_type: ReferenceUpdate::Set(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(BasicInfoError::InvalidTripType(_))));
    }

    #[tokio::test]
    async fn update_by_stranger_is_forbidden() {
        let plan = Plan::new(Uuid::new_v4(), None, 1, true);
        let plan_id = plan.id;

        let result = service(
            plans_returning(plan),
            MockBasicInfoRepository::new(),
            MockLookupRepository::new(),
        )
        .update(plan_id, Uuid::new_v4(), BasicInfoUpdate::default())
        .await;

        assert!(matches!(result, Err(BasicInfoError::Forbidden)));
    }

    #[tokio::test]
    async fn update_rejects_reversed_dates() {
        let owner = Uuid::new_v4();
        let plan = Plan::new(owner, None, 1, false);
        let plan_id = plan.id;
        let mut infos = MockBasicInfoRepository::new();
        infos.expect_find_by_plan().returning(|_| Ok(None));
        infos.expect_save().never();

        let result = service(plans_returning(plan), infos, MockLookupRepository::new())
            .update(
                plan_id,
                owner,
                BasicInfoUpdate {
                    start_date: NaiveDate::from_ymd_opt(2025, 5, 10),
                    end_date: NaiveDate::from_ymd_opt(2025, 5, 1),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(BasicInfoError::Invalid(_))));
    }

    #[tokio::test]
    async fn update_saves_plan_and_row_together() {
        let owner = Uuid::new_v4();
        let plan = Plan::new(owner, Some("Old".into()), 1, false);
        let plan_id = plan.id;
        let mut infos = MockBasicInfoRepository::new();
        infos.expect_find_by_plan().returning(|_| Ok(None));
        infos
            .expect_save()
            .withf(|plan, info| {
                plan.title.as_deref() == Some("New")
                    && plan.cover_image_url.as_deref() == Some("/uploads/c.png")
                    && info.cover_img_url.as_deref() == Some("/uploads/c.png")
                    && info.location.as_deref() == Some("Alps")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        service(plans_returning(plan), infos, MockLookupRepository::new())
            .update(
                plan_id,
                owner,
                BasicInfoUpdate {
                    title: Some("New".into()),
                    cover_image_url: Some("/uploads/c.png".into()),
                    location: Some("Alps".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
}
