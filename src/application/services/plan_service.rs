//! Plan Service
//!
//! Plan lifecycle: listing, creation, patching, soft deletion and
//! ownership checks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::services::PlanAccessService;
use crate::domain::{default_status, LookupRepository, Plan, PlanMember, PlanRepository, UserRepository};
use crate::shared::error::AppError;

/// Plan service trait
#[async_trait]
pub trait PlanService: Send + Sync {
    /// Plans owned by the caller, newest first.
    async fn list_my_plans(&self, user_id: Uuid) -> Result<Vec<Plan>, PlanError>;

    /// Plans owned by `owner_id`; private ones only when `viewer` is the owner.
    async fn list_user_plans(
        &self,
        owner_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Vec<Plan>, PlanError>;

    async fn list_public_plans(&self) -> Result<Vec<Plan>, PlanError>;

    /// A single plan, respecting visibility.
    async fn get_plan(&self, plan_id: Uuid, viewer: Option<Uuid>) -> Result<Plan, PlanError>;

    /// Untitled private plan in the default status.
    async fn create_empty_plan(&self, user_id: Uuid) -> Result<Plan, PlanError>;

    async fn create_plan(&self, user_id: Uuid, request: CreatePlanDto) -> Result<Plan, PlanError>;

    async fn update_plan(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        request: UpdatePlanDto,
    ) -> Result<Plan, PlanError>;

    async fn delete_plan(&self, plan_id: Uuid, user_id: Uuid) -> Result<(), PlanError>;

    async fn is_plan_owner(&self, plan_id: Uuid, user_id: Uuid) -> Result<bool, PlanError>;

    async fn list_members(&self, plan_id: Uuid, user_id: Uuid)
        -> Result<Vec<PlanMember>, PlanError>;
}

/// Create plan request
#[derive(Debug, Clone)]
pub struct CreatePlanDto {
    pub title: Option<String>,
    pub status_id: i32,
    pub is_public: bool,
}

/// Update plan request. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlanDto {
    pub title: Option<String>,
    pub status_id: Option<i32>,
    pub is_public: Option<bool>,
    pub cover_image_url: Option<String>,
}

/// Plan service errors
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Plan not found")]
    NotFound,

    #[error("You do not have access to this plan")]
    Forbidden,

    #[error("Status with ID {0} does not exist")]
    InvalidStatus(i32),

    #[error("No plan statuses available")]
    NoStatuses,

    #[error("User does not exist")]
    UserNotFound,

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::NotFound => AppError::NotFound(err.to_string()),
            PlanError::Forbidden => AppError::Forbidden(err.to_string()),
            PlanError::InvalidStatus(_) | PlanError::NoStatuses | PlanError::UserNotFound => {
                AppError::BadRequest(err.to_string())
            }
            PlanError::Repository(e) => e,
        }
    }
}

/// Load a live plan the user may manage.
///
/// Missing plans and plans of other users both yield `None`, so callers can
/// answer 403 without revealing whether the plan exists.
pub async fn find_managed_plan<P>(
    plan_repo: &P,
    plan_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Plan>, AppError>
where
    P: PlanRepository + ?Sized,
{
    Ok(plan_repo
        .find_by_id(plan_id)
        .await?
        .filter(|plan| PlanAccessService::can_manage(plan, user_id)))
}

/// PlanService implementation
pub struct PlanServiceImpl<P, L, U>
where
    P: PlanRepository,
    L: LookupRepository,
    U: UserRepository,
{
    plan_repo: Arc<P>,
    lookup_repo: Arc<L>,
    user_repo: Arc<U>,
}

impl<P, L, U> PlanServiceImpl<P, L, U>
where
    P: PlanRepository,
    L: LookupRepository,
    U: UserRepository,
{
    pub fn new(plan_repo: Arc<P>, lookup_repo: Arc<L>, user_repo: Arc<U>) -> Self {
        Self {
            plan_repo,
            lookup_repo,
            user_repo,
        }
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> Result<(), PlanError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or(PlanError::UserNotFound)
    }

    async fn ensure_status_exists(&self, status_id: i32) -> Result<(), PlanError> {
        if self.lookup_repo.status_exists(status_id).await? {
            Ok(())
        } else {
            Err(PlanError::InvalidStatus(status_id))
        }
    }

    /// Existing plan owned by `user_id`; distinguishes 404 from 403.
    async fn owned_plan(&self, plan_id: Uuid, user_id: Uuid) -> Result<Plan, PlanError> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await?
            .ok_or(PlanError::NotFound)?;

        if !PlanAccessService::can_manage(&plan, user_id) {
            return Err(PlanError::Forbidden);
        }
        Ok(plan)
    }
}

#[async_trait]
impl<P, L, U> PlanService for PlanServiceImpl<P, L, U>
where
    P: PlanRepository + 'static,
    L: LookupRepository + 'static,
    U: UserRepository + 'static,
{
    async fn list_my_plans(&self, user_id: Uuid) -> Result<Vec<Plan>, PlanError> {
        Ok(self.plan_repo.list_by_owner(user_id, false).await?)
    }

    async fn list_user_plans(
        &self,
        owner_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Vec<Plan>, PlanError> {
        let public_only = PlanAccessService::public_only_listing(owner_id, viewer);
        Ok(self.plan_repo.list_by_owner(owner_id, public_only).await?)
    }

    async fn list_public_plans(&self) -> Result<Vec<Plan>, PlanError> {
        Ok(self.plan_repo.list_public().await?)
    }

    async fn get_plan(&self, plan_id: Uuid, viewer: Option<Uuid>) -> Result<Plan, PlanError> {
        self.plan_repo
            .find_by_id(plan_id)
            .await?
            .filter(|plan| PlanAccessService::can_view(plan, viewer))
            .ok_or(PlanError::NotFound)
    }

    async fn create_empty_plan(&self, user_id: Uuid) -> Result<Plan, PlanError> {
        self.ensure_user_exists(user_id).await?;

        let statuses = self.lookup_repo.list_statuses().await?;
        let status = default_status(&statuses).ok_or(PlanError::NoStatuses)?;

        let plan = Plan::new(user_id, None, status.id, false);
        let created = self.plan_repo.create(&plan).await?;

        tracing::info!(plan_id = %created.id, %user_id, "Empty plan created");
        Ok(created)
    }

    async fn create_plan(&self, user_id: Uuid, request: CreatePlanDto) -> Result<Plan, PlanError> {
        self.ensure_status_exists(request.status_id).await?;
        self.ensure_user_exists(user_id).await?;

        let plan = Plan::new(user_id, request.title, request.status_id, request.is_public);
        let created = self.plan_repo.create(&plan).await?;

        tracing::info!(plan_id = %created.id, %user_id, "Plan created");
        Ok(created)
    }

    async fn update_plan(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        request: UpdatePlanDto,
    ) -> Result<Plan, PlanError> {
        let mut plan = self.owned_plan(plan_id, user_id).await?;

        if let Some(title) = request.title {
            plan.title = Some(title);
        }
        if let Some(status_id) = request.status_id {
            self.ensure_status_exists(status_id).await?;
            plan.status_id = status_id;
        }
        if let Some(is_public) = request.is_public {
            plan.is_public = is_public;
        }
        if let Some(cover) = request.cover_image_url {
            plan.cover_image_url = Some(cover);
        }
        plan.updated_at = Utc::now();

        self.plan_repo
            .update(&plan)
            .await?
            .ok_or(PlanError::NotFound)
    }

    async fn delete_plan(&self, plan_id: Uuid, user_id: Uuid) -> Result<(), PlanError> {
        self.owned_plan(plan_id, user_id).await?;

        if !self.plan_repo.soft_delete(plan_id).await? {
            return Err(PlanError::NotFound);
        }
        tracing::info!(%plan_id, %user_id, "Plan deleted");
        Ok(())
    }

    async fn is_plan_owner(&self, plan_id: Uuid, user_id: Uuid) -> Result<bool, PlanError> {
        Ok(self
            .plan_repo
            .find_by_id(plan_id)
            .await?
            .is_some_and(|plan| plan.is_owned_by(user_id)))
    }

    async fn list_members(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<PlanMember>, PlanError> {
        find_managed_plan(&*self.plan_repo, plan_id, user_id)
            .await?
            .ok_or(PlanError::Forbidden)?;
        Ok(self.plan_repo.list_members(plan_id).await?)
    }
}
