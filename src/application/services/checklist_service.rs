//! Checklist Service
//!
//! Preparation to-dos of a plan. Owner only.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::plan_service::find_managed_plan;
use crate::domain::{ChecklistItem, ChecklistRepository, PlanRepository};
use crate::shared::error::AppError;

#[async_trait]
pub trait ChecklistService: Send + Sync {
    async fn list(&self, plan_id: Uuid, user_id: Uuid) -> Result<Vec<ChecklistItem>, ChecklistError>;

    async fn create(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        request: CreateChecklistItemDto,
    ) -> Result<ChecklistItem, ChecklistError>;

    async fn update(
        &self,
        plan_id: Uuid,
        id: Uuid,
        user_id: Uuid,
        request: UpdateChecklistItemDto,
    ) -> Result<ChecklistItem, ChecklistError>;

    async fn delete(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<(), ChecklistError>;
}

#[derive(Debug, Clone, Default)]
pub struct CreateChecklistItemDto {
    pub category: Option<String>,
    pub title: String,
    /// Appended after the last item when absent
    pub position: Option<i32>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateChecklistItemDto {
    pub category: Option<String>,
    pub title: Option<String>,
    pub is_done: Option<bool>,
    pub position: Option<i32>,
    pub note: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    #[error("You do not have access to this plan")]
    Forbidden,

    #[error("Checklist item not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<ChecklistError> for AppError {
    fn from(err: ChecklistError) -> Self {
        match err {
            ChecklistError::Forbidden => AppError::Forbidden(err.to_string()),
            ChecklistError::NotFound => AppError::NotFound(err.to_string()),
            ChecklistError::Repository(e) => e,
        }
    }
}

pub struct ChecklistServiceImpl<P: PlanRepository, C: ChecklistRepository> {
    plan_repo: Arc<P>,
    checklist_repo: Arc<C>,
}

impl<P: PlanRepository, C: ChecklistRepository> ChecklistServiceImpl<P, C> {
    pub fn new(plan_repo: Arc<P>, checklist_repo: Arc<C>) -> Self {
        Self {
            plan_repo,
            checklist_repo,
        }
    }

    async fn authorize(&self, plan_id: Uuid, user_id: Uuid) -> Result<(), ChecklistError> {
        find_managed_plan(&*self.plan_repo, plan_id, user_id)
            .await?
            .map(|_| ())
            .ok_or(ChecklistError::Forbidden)
    }
}

#[async_trait]
impl<P, C> ChecklistService for ChecklistServiceImpl<P, C>
where
    P: PlanRepository + 'static,
    C: ChecklistRepository + 'static,
{
    async fn list(&self, plan_id: Uuid, user_id: Uuid) -> Result<Vec<ChecklistItem>, ChecklistError> {
        self.authorize(plan_id, user_id).await?;
        Ok(self.checklist_repo.list_by_plan(plan_id).await?)
    }

    async fn create(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        request: CreateChecklistItemDto,
    ) -> Result<ChecklistItem, ChecklistError> {
        self.authorize(plan_id, user_id).await?;

        let position = match request.position {
            Some(position) => position,
            None => self.checklist_repo.next_position(plan_id).await?,
        };

        let item = ChecklistItem {
            id: Uuid::new_v4(),
            plan_id,
            category: request.category,
            title: request.title,
            is_done: false,
            position,
            note: request.note,
            created_at: Utc::now(),
            completed_at: None,
            deleted_at: None,
        };

        let created = self.checklist_repo.create(&item).await?;
        tracing::debug!(%plan_id, item_id = %created.id, "Checklist item created");
        Ok(created)
    }

    async fn update(
        &self,
        plan_id: Uuid,
        id: Uuid,
        user_id: Uuid,
        request: UpdateChecklistItemDto,
    ) -> Result<ChecklistItem, ChecklistError> {
        self.authorize(plan_id, user_id).await?;

        let mut item = self
            .checklist_repo
            .find_by_id(plan_id, id)
            .await?
            .ok_or(ChecklistError::NotFound)?;

        if let Some(category) = request.category {
            item.category = Some(category);
        }
        if let Some(title) = request.title {
            item.title = title;
        }
        if let Some(position) = request.position {
            item.position = position;
        }
        if let Some(note) = request.note {
            item.note = Some(note);
        }
        if let Some(done) = request.is_done {
            item.set_done(done, Utc::now());
        }

        self.checklist_repo
            .update(&item)
            .await?
            .ok_or(ChecklistError::NotFound)
    }

    async fn delete(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<(), ChecklistError> {
        self.authorize(plan_id, user_id).await?;

        if !self.checklist_repo.soft_delete(plan_id, id).await? {
            return Err(ChecklistError::NotFound);
        }
        Ok(())
    }
}
