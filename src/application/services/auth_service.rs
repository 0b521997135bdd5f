//! Authentication Service
//!
//! Handles registration, login, refresh token rotation, logout and password
//! changes.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::token_service::{hash_refresh_token, AuthTokens, TokenService};
use crate::domain::{Session, SessionRepository, User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::validation::check_password_policy;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and sign them in.
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<(User, AuthTokens), AuthError>;

    /// Authenticate user with credentials
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, AuthError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// When the client also presents its previous access token, its signature
    /// is checked (expiry ignored) and its subject must own the session.
    async fn refresh_token(
        &self,
        refresh_token: &str,
        access_token: Option<&str>,
    ) -> Result<AuthTokens, AuthError>;

    /// Revoke refresh token (logout). Unknown tokens are ignored.
    async fn revoke_token(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Change the password and sign out every session of the user.
    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailExists,

    #[error("Session not found or expired")]
    SessionNotFound,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("{0}")]
    WeakPassword(&'static str),

    #[error(transparent)]
    Repository(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".into())
            }
            AuthError::TokenExpired => AppError::Unauthorized("Refresh token expired".into()),
            AuthError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
            AuthError::UserNotFound => AppError::Unauthorized("User not found".into()),
            AuthError::SessionNotFound => {
                AppError::Unauthorized("Invalid or expired refresh token".into())
            }
            AuthError::EmailExists => AppError::Conflict("Email already exists".into()),
            AuthError::IncorrectPassword => {
                AppError::BadRequest("Current password is incorrect".into())
            }
            AuthError::WeakPassword(message) => AppError::Validation(message.into()),
            AuthError::Repository(e) => e,
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: TokenService,
}

impl<U, S> AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, tokens: TokenService) -> Self {
        Self {
            user_repo,
            session_repo,
            tokens,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Issue a token pair and persist the refresh token's session.
    async fn start_session(&self, user_id: Uuid) -> Result<AuthTokens, AuthError> {
        let tokens = self.tokens.issue_pair(user_id)?;
        let session = Session::new(
            user_id,
            hash_refresh_token(&tokens.refresh_token),
            Utc::now() + self.tokens.refresh_token_lifetime(),
        );
        self.session_repo.create(&session).await?;
        Ok(tokens)
    }
}

#[async_trait]
impl<U, S> AuthService for AuthServiceImpl<U, S>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<(User, AuthTokens), AuthError> {
        check_password_policy(password).map_err(AuthError::WeakPassword)?;

        let email = email.trim();
        if self.user_repo.email_exists(email).await? {
            return Err(AuthError::EmailExists);
        }

        let password_hash = self.hash_password(password)?;
        let user = User::register(email, password_hash, display_name);
        let created = self.user_repo.create(&user).await?;

        let tokens = self.start_session(created.id).await?;

        tracing::info!(user_id = %created.id, "User registered");
        Ok((created, tokens))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.user_repo.touch_last_login(user.id).await?;
        let tokens = self.start_session(user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(tokens)
    }

    async fn refresh_token(
        &self,
        refresh_token: &str,
        access_token: Option<&str>,
    ) -> Result<AuthTokens, AuthError> {
        let session = self
            .session_repo
            .find_by_token_hash(&hash_refresh_token(refresh_token))
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if !session.is_active() {
            return Err(AuthError::TokenExpired);
        }

        if let Some(access_token) = access_token {
            let claims = self.tokens.decode_ignoring_expiry(access_token)?;
            if claims.user_id()? != session.user_id {
                tracing::warn!(session_id = %session.id, "Refresh attempted with foreign access token");
                return Err(AuthError::InvalidToken);
            }
        }

        self.user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Rotation: the presented refresh token stops working from here on
        let tokens = self.tokens.issue_pair(session.user_id)?;
        self.session_repo
            .rotate(
                session.id,
                &hash_refresh_token(&tokens.refresh_token),
                Utc::now() + self.tokens.refresh_token_lifetime(),
            )
            .await?;

        Ok(tokens)
    }

    async fn revoke_token(&self, refresh_token: &str) -> Result<(), AuthError> {
        if let Some(session) = self
            .session_repo
            .find_by_token_hash(&hash_refresh_token(refresh_token))
            .await?
        {
            self.session_repo.revoke(session.id).await?;
            tracing::info!(user_id = %session.user_id, "Session revoked");
        }
        Ok(())
    }

    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.verify_password(current_password, &user.password_hash)? {
            return Err(AuthError::IncorrectPassword);
        }
        check_password_policy(new_password).map_err(AuthError::WeakPassword)?;

        let password_hash = self.hash_password(new_password)?;
        self.user_repo.update_password(user_id, &password_hash).await?;
        let revoked = self.session_repo.revoke_all_for_user(user_id).await?;

        tracing::info!(%user_id, revoked_sessions = revoked, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtSettings;
    use crate::domain::{MockSessionRepository, MockUserRepository};
    use chrono::Duration;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    const PASSWORD: &str = "Str0ng!Pass";

    fn tokens() -> TokenService {
        TokenService::new(JwtSettings {
            secret: "a-very-long-test-secret-of-at-least-32-chars".into(),
            access_token_expiry_minutes: 60,
            refresh_token_expiry_days: 1,
        })
    }

    fn hashed(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn service(
        users: MockUserRepository,
        sessions: MockSessionRepository,
    ) -> AuthServiceImpl<MockUserRepository, MockSessionRepository> {
        AuthServiceImpl::new(Arc::new(users), Arc::new(sessions), tokens())
    }

    fn stored_user(email: &str) -> User {
        User::register(email, hashed(PASSWORD), None)
    }

    #[tokio::test]
    async fn register_creates_user_and_session() {
        let email: String = SafeEmail().fake();
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(false));
        users.expect_create().returning(|u| Ok(u.clone()));
        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().times(1).returning(|s| Ok(s.clone()));

        let (user, tokens) = service(users, sessions)
            .register(&email, PASSWORD, None)
            .await
            .unwrap();

        assert_eq!(user.email, email);
        assert_eq!(
            user.display_name.as_deref(),
            email.split('@').next()
        );
        assert_ne!(user.password_hash, PASSWORD);
        assert_eq!(tokens.token_type, "Bearer");
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(true));
        users.expect_create().never();

        let result = service(users, MockSessionRepository::new())
            .register("taken@example.com", PASSWORD, None)
            .await;

        assert!(matches!(result, Err(AuthError::EmailExists)));
    }

    #[tokio::test]
    async fn register_enforces_password_policy() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().never();

        let result = service(users, MockSessionRepository::new())
            .register("new@example.com", "password", None)
            .await;

        assert!(matches!(
            result,
            Err(AuthError::WeakPassword("Password must contain at least one number"))
        ));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let user = stored_user("jane@example.com");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_touch_last_login().never();
        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().never();

        let result = service(users, sessions)
            .authenticate("jane@example.com", "Wrong!Pass1")
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_rejected() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = service(users, MockSessionRepository::new())
            .authenticate("ghost@example.com", PASSWORD)
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_stamps_last_login() {
        let user = stored_user("jane@example.com");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_touch_last_login().times(1).returning(|_| Ok(()));
        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().times(1).returning(|s| Ok(s.clone()));

        let tokens = service(users, sessions)
            .authenticate("jane@example.com", PASSWORD)
            .await
            .unwrap();

        assert_eq!(tokens.expires_in, 3600);
    }

    #[tokio::test]
    async fn refresh_rotates_session() {
        let user = stored_user("jane@example.com");
        let user_id = user.id;
        let session = Session::new(user_id, "ignored".into(), Utc::now() + Duration::days(1));
        let session_id = session.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token_hash()
            .returning(move |_| Ok(Some(session.clone())));
        sessions
            .expect_rotate()
            .withf(move |id, hash, _| *id == session_id && hash.len() == 64)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (old_access, _) = tokens().issue_access_token(user_id).unwrap();
        let new_tokens = service(users, sessions)
            .refresh_token("refresh", Some(&old_access))
            .await
            .unwrap();

        assert_ne!(new_tokens.refresh_token, "refresh");
    }

    #[tokio::test]
    async fn refresh_with_foreign_access_token_is_rejected() {
        let session = Session::new(Uuid::new_v4(), "h".into(), Utc::now() + Duration::days(1));
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token_hash()
            .returning(move |_| Ok(Some(session.clone())));
        sessions.expect_rotate().never();

        let (foreign, _) = tokens().issue_access_token(Uuid::new_v4()).unwrap();
        let result = service(MockUserRepository::new(), sessions)
            .refresh_token("refresh", Some(&foreign))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn refresh_with_expired_session_is_rejected() {
        let session = Session::new(Uuid::new_v4(), "h".into(), Utc::now() - Duration::minutes(1));
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token_hash()
            .returning(move |_| Ok(Some(session.clone())));

        let result = service(MockUserRepository::new(), sessions)
            .refresh_token("refresh", None)
            .await;

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn refresh_with_unknown_token_is_rejected() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token_hash().returning(|_| Ok(None));

        let result = service(MockUserRepository::new(), sessions)
            .refresh_token("nope", None)
            .await;

        assert!(matches!(result, Err(AuthError::SessionNotFound)));
    }

    #[tokio::test]
    async fn logout_with_unknown_token_succeeds() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token_hash().returning(|_| Ok(None));
        sessions.expect_revoke().never();

        service(MockUserRepository::new(), sessions)
            .revoke_token("unknown")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn change_password_requires_current_password() {
        let user = stored_user("jane@example.com");
        let user_id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_update_password().never();

        let result = service(users, MockSessionRepository::new())
            .change_password(user_id, "Wrong!Pass1", "N3w!Password")
            .await;

        assert!(matches!(result, Err(AuthError::IncorrectPassword)));
    }

    #[tokio::test]
    async fn change_password_revokes_sessions() {
        let user = stored_user("jane@example.com");
        let user_id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users
            .expect_update_password()
            .times(1)
            .returning(|_, _| Ok(()));
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_revoke_all_for_user()
            .times(1)
            .returning(|_| Ok(2));

        service(users, sessions)
            .change_password(user_id, PASSWORD, "N3w!Password")
            .await
            .unwrap();
    }

    #[test]
    fn errors_map_to_http_semantics() {
        use axum::http::StatusCode;
        assert_eq!(
            AppError::from(AuthError::EmailExists).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AuthError::IncorrectPassword).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AuthError::SessionNotFound).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
