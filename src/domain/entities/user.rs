//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a registered account.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY
/// - email: VARCHAR(255) NOT NULL (unique among live rows, case-insensitive)
/// - password_hash: VARCHAR(255) NOT NULL
/// - display_name: VARCHAR(100) NULL
/// - avatar_url: TEXT NULL
/// - registered_at_utc: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - last_login_at_utc: TIMESTAMPTZ NULL
/// - deleted_at_utc: TIMESTAMPTZ NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub display_name: Option<String>,

    /// URL to the user's profile image
    pub avatar_url: Option<String>,

    pub registered_at: DateTime<Utc>,

    pub last_login_at: Option<DateTime<Utc>>,

    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a freshly registered user.
    ///
    /// When no display name is supplied the local part of the email is used.
    pub fn register(email: &str, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        let display_name = display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .or_else(|| Some(default_display_name(email)));

        Self {
            id: Uuid::new_v4(),
            email: email.trim().to_string(),
            password_hash,
            display_name,
            avatar_url: None,
            registered_at: now,
            last_login_at: Some(now),
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Local part of an email address (text before `@`).
pub fn default_display_name(email: &str) -> String {
    email
        .trim()
        .split_once('@')
        .map(|(local, _)| local)
        .unwrap_or(email)
        .to_string()
}

/// Repository trait for User data access operations.
///
/// Every lookup ignores soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a live user by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Find a live user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Create a new user in the database.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Replace the stored password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError>;

    /// Stamp `last_login_at_utc` with the current time.
    async fn touch_last_login(&self, id: Uuid) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("jane.doe@example.com", "jane.doe")]
    #[test_case("  bob@example.com ", "bob")]
    #[test_case("no-at-sign", "no-at-sign")]
    fn display_name_defaults_to_local_part(email: &str, expected: &str) {
        assert_eq!(default_display_name(email), expected);
    }

    #[test]
    fn register_prefers_explicit_display_name() {
        let user = User::register("a@b.com", "hash".into(), Some(" Alice ".into()));
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn register_ignores_blank_display_name() {
        let user = User::register("alice@b.com", "hash".into(), Some("   ".into()));
        assert_eq!(user.display_name.as_deref(), Some("alice"));
        assert!(!user.is_deleted());
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn password_hash_not_serialized() {
        let user = User::register("a@b.com", "secret-hash".into(), None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
