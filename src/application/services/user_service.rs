//! User Service
//!
//! Profile lookups for the signed-in user.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Profile of the given user.
    async fn get_profile(&self, user_id: Uuid) -> Result<UserProfileDto, UserError>;
}

/// Public profile of a user
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfileDto {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub profile_image_url: Option<String>,
}

impl From<User> for UserProfileDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.display_name,
            email: user.email,
            profile_image_url: user.avatar_url,
        }
    }
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            // A valid token for a vanished account is treated as unauthenticated
            UserError::NotFound => AppError::Unauthorized("User not found".into()),
            UserError::Repository(e) => e,
        }
    }
}

/// UserService implementation
pub struct UserServiceImpl<U: UserRepository> {
    user_repo: Arc<U>,
}

impl<U: UserRepository> UserServiceImpl<U> {
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U: UserRepository + 'static> UserService for UserServiceImpl<U> {
    async fn get_profile(&self, user_id: Uuid) -> Result<UserProfileDto, UserError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(UserProfileDto::from)
            .ok_or(UserError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockUserRepository;

    #[tokio::test]
    async fn profile_maps_display_name_and_avatar() {
        let mut user = User::register("jane@example.com", "hash".into(), Some("Jane".into()));
        user.avatar_url = Some("/uploads/jane.png".into());
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let profile = UserServiceImpl::new(Arc::new(repo))
            .get_profile(id)
            .await
            .unwrap();

        assert_eq!(
            profile,
            UserProfileDto {
                id,
                full_name: Some("Jane".into()),
                email: "jane@example.com".into(),
                profile_image_url: Some("/uploads/jane.png".into()),
            }
        );
    }

    #[tokio::test]
    async fn missing_user_is_unauthorized() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = UserServiceImpl::new(Arc::new(repo))
            .get_profile(Uuid::new_v4())
            .await
            .unwrap_err();

        assert_eq!(
            AppError::from(err).status_code(),
            axum::http::StatusCode::UNAUTHORIZED
        );
    }
}
