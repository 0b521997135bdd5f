//! Lookup Service
//!
//! Read-only access to plan statuses and trip types.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{LookupRepository, PlanStatus, TripType};
use crate::shared::error::AppError;

#[async_trait]
pub trait LookupService: Send + Sync {
    async fn list_statuses(&self) -> Result<Vec<PlanStatus>, AppError>;

    async fn list_trip_types(&self) -> Result<Vec<TripType>, AppError>;
}

pub struct LookupServiceImpl<L: LookupRepository> {
    lookup_repo: Arc<L>,
}

impl<L: LookupRepository> LookupServiceImpl<L> {
    pub fn new(lookup_repo: Arc<L>) -> Self {
        Self { lookup_repo }
    }
}

#[async_trait]
impl<L: LookupRepository + 'static> LookupService for LookupServiceImpl<L> {
    async fn list_statuses(&self) -> Result<Vec<PlanStatus>, AppError> {
        self.lookup_repo.list_statuses().await
    }

    async fn list_trip_types(&self) -> Result<Vec<TripType>, AppError> {
        self.lookup_repo.list_trip_types().await
    }
}
